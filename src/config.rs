use crate::theme::Theme;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest gap between the first and last sample that still closes a path.
pub const DEFAULT_CLOSE_THRESHOLD: f64 = 100.0;
/// Pointer moves shorter than this are not recorded.
pub const DEFAULT_MIN_SAMPLE_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub close_threshold: f64,
    pub min_sample_distance: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            min_sample_distance: DEFAULT_MIN_SAMPLE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Draw a marker at each label anchor.
    pub show_label_point: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 480.0,
            show_label_point: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub capture: CaptureConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Checks the tunables that would make capture or rendering meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.capture.close_threshold >= 0.0) {
            bail!(
                "closeThreshold must be a non-negative number, got {}",
                self.capture.close_threshold
            );
        }
        if !(self.capture.min_sample_distance >= 0.0) {
            bail!(
                "minSampleDistance must be a non-negative number, got {}",
                self.capture.min_sample_distance
            );
        }
        if !(self.render.width > 0.0 && self.render.height > 0.0) {
            bail!(
                "canvas size must be positive, got {}x{}",
                self.render.width,
                self.render.height
            );
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    stroke_color: Option<String>,
    fill_color: Option<String>,
    stroke_width: Option<f64>,
    start_marker_radius: Option<f64>,
    label_point_color: Option<String>,
    label_point_outline: Option<String>,
    label_point_outline_width: Option<f64>,
    label_point_radius: Option<f64>,
    font_family: Option<String>,
    font_size: Option<f64>,
    font_weight: Option<String>,
    label_color: Option<String>,
    label_outline_color: Option<String>,
    label_outline_width: Option<f64>,
}

/// On-disk (and inline `%%{init: ...}%%`) configuration. Every key is
/// optional and overrides the current value.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    close_threshold: Option<f64>,
    min_sample_distance: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    show_label_point: Option<bool>,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(json5::from_str(contents)?)
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let parsed = ConfigFile::parse(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;
    let config = merge_config(config, parsed)?;
    config.validate()?;
    Ok(config)
}

/// Applies `file` on top of `config`. A named theme replaces the whole theme
/// before individual variables are applied.
pub fn merge_config(mut config: Config, file: ConfigFile) -> anyhow::Result<Config> {
    if let Some(name) = file.theme.as_deref() {
        match Theme::by_name(name) {
            Some(theme) => config.theme = theme,
            None => bail!("unknown theme '{name}' (expected 'classic' or 'modern')"),
        }
    }

    if let Some(vars) = file.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.stroke_color {
            theme.stroke_color = v;
        }
        if let Some(v) = vars.fill_color {
            theme.fill_color = v;
        }
        if let Some(v) = vars.stroke_width {
            theme.stroke_width = v;
        }
        if let Some(v) = vars.start_marker_radius {
            theme.start_marker_radius = v;
        }
        if let Some(v) = vars.label_point_color {
            theme.label_point_color = v;
        }
        if let Some(v) = vars.label_point_outline {
            theme.label_point_outline = v;
        }
        if let Some(v) = vars.label_point_outline_width {
            theme.label_point_outline_width = v;
        }
        if let Some(v) = vars.label_point_radius {
            theme.label_point_radius = v;
        }
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.font_weight {
            theme.font_weight = v;
        }
        if let Some(v) = vars.label_color {
            theme.label_color = v;
        }
        if let Some(v) = vars.label_outline_color {
            theme.label_outline_color = v;
        }
        if let Some(v) = vars.label_outline_width {
            theme.label_outline_width = v;
        }
    }

    if let Some(v) = file.close_threshold {
        config.capture.close_threshold = v;
    }
    if let Some(v) = file.min_sample_distance {
        config.capture.min_sample_distance = v;
    }
    if let Some(v) = file.width {
        config.render.width = v;
    }
    if let Some(v) = file.height {
        config.render.height = v;
    }
    if let Some(v) = file.show_label_point {
        config.render.show_label_point = v;
    }
    Ok(config)
}
