use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f64,
    /// Dot drawn at the first point of an unfinished path.
    pub start_marker_radius: f64,
    pub label_point_color: String,
    pub label_point_outline: String,
    pub label_point_outline_width: f64,
    pub label_point_radius: f64,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub label_color: String,
    pub label_outline_color: String,
    pub label_outline_width: f64,
}

impl Theme {
    /// Green sketch palette with bold Arial labels.
    pub fn classic() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            stroke_color: "#34C759".to_string(),
            fill_color: "#8ED596".to_string(),
            stroke_width: 2.0,
            start_marker_radius: 3.0,
            label_point_color: "#34C759".to_string(),
            label_point_outline: "#FFFFFF".to_string(),
            label_point_outline_width: 8.0,
            label_point_radius: 8.0,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 20.0,
            font_weight: "bold".to_string(),
            label_color: "#0B5D54".to_string(),
            label_outline_color: "#FFFFFF".to_string(),
            label_outline_width: 4.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            background: "#F8FAFF".to_string(),
            stroke_color: "#7A8AA6".to_string(),
            fill_color: "#EEF2F8".to_string(),
            stroke_width: 1.5,
            start_marker_radius: 3.0,
            label_point_color: "#C7D2E5".to_string(),
            label_point_outline: "#FFFFFF".to_string(),
            label_point_outline_width: 4.0,
            label_point_radius: 6.0,
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 16.0,
            font_weight: "600".to_string(),
            label_color: "#1C2430".to_string(),
            label_outline_color: "#FFFFFF".to_string(),
            label_outline_width: 3.0,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
