use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Advance used per character when no font can be loaded.
const FALLBACK_ADVANCE_EM: f64 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Rendered width of a single-line label. Falls back to an average advance
/// per character when the font family cannot be resolved.
pub fn measure_label_width(text: &str, font_size: f64, font_family: &str, font_weight: &str) -> f64 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    let measured = TEXT_MEASURER
        .lock()
        .ok()
        .and_then(|mut guard| guard.measure(text, font_size, font_family, parse_weight(font_weight)));
    measured.unwrap_or_else(|| fallback_width(text, font_size))
}

fn fallback_width(text: &str, font_size: f64) -> f64 {
    text.chars().filter(|ch| *ch != '\n').count() as f64 * font_size * FALLBACK_ADVANCE_EM
}

/// CSS `font-weight` to a fontdb weight. Unknown values read as normal.
pub fn parse_weight(value: &str) -> Weight {
    match value.trim().to_ascii_lowercase().as_str() {
        "bold" | "bolder" => Weight::BOLD,
        "lighter" => Weight::LIGHT,
        other => other
            .parse::<u16>()
            .ok()
            .filter(|w| (1..=1000).contains(w))
            .map_or(Weight::NORMAL, Weight),
    }
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<(String, u16), Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f64, font_family: &str, weight: Weight) -> Option<f64> {
        let key = (font_family.trim().to_string(), weight.0);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(font_family, weight);
            self.cache.insert(key.clone(), face);
        }
        self.cache.get_mut(&key)?.as_mut()?.measure_width(text, font_size)
    }

    fn load_face(&mut self, font_family: &str, weight: Weight) -> Option<FontFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    Family::SansSerif
                }
                "monospace" | "ui-monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let query = Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::new(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advances: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let units_per_em = Face::parse(&data, index).ok()?.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            advances: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f64) -> Option<f64> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let scale = font_size / f64::from(self.units_per_em);
        let fallback = font_size * FALLBACK_ADVANCE_EM;

        let mut width = 0.0;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *self.advances.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
            });
            width += match advance {
                Some(units) if units > 0 => f64::from(units) * scale,
                _ => fallback,
            };
        }
        Some(width.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(measure_label_width("", 20.0, "Arial", "bold"), 0.0);
        assert_eq!(measure_label_width("abc", 0.0, "Arial", "bold"), 0.0);
    }

    #[test]
    fn width_grows_with_text() {
        let one = measure_label_width("W", 20.0, "sans-serif", "bold");
        let three = measure_label_width("WWW", 20.0, "sans-serif", "bold");
        assert!(one > 0.0);
        assert!(three > one);
    }

    #[test]
    fn unknown_family_still_measures() {
        let width = measure_label_width("label", 10.0, "No Such Font 12345", "normal");
        assert!(width > 0.0);
    }

    #[test]
    fn parses_css_weights() {
        assert_eq!(parse_weight("bold"), Weight::BOLD);
        assert_eq!(parse_weight("600"), Weight(600));
        assert_eq!(parse_weight("normal"), Weight::NORMAL);
        assert_eq!(parse_weight("9000"), Weight::NORMAL);
    }

    #[test]
    fn fallback_counts_characters() {
        assert_eq!(fallback_width("abcd", 10.0), 4.0 * 10.0 * FALLBACK_ADVANCE_EM);
    }
}
