use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

const KNOWN_CATEGORIES: &[(&str, Color32)] = &[
    ("Raccolta dati", Color32::from_rgb(0x34, 0x98, 0xdb)),
    ("Sistematizzazione", Color32::from_rgb(0x2e, 0xcc, 0x71)),
    ("Produzione e coding", Color32::from_rgb(0xe7, 0x4c, 0x3c)),
    ("Formazione personale", Color32::from_rgb(0xf3, 0x9c, 0x12)),
    ("Disseminazione e scrittura", Color32::from_rgb(0x9b, 0x59, 0xb6)),
    ("Analisi dati", Color32::from_rgb(0x1a, 0xbc, 0x9c)),
];

/// Colour for a category: the fixed table for known categories, otherwise a
/// hue derived from a hash of the name (same input, same colour).
pub fn color_for(category: &str) -> Color32 {
    KNOWN_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, c)| *c)
        .unwrap_or_else(|| hashed_color(category))
}

fn hashed_color(category: &str) -> Color32 {
    let hue = (fnv1a(category.as_bytes()) % 360) as f32;
    let hsl = Hsl::new(hue, 0.65, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// 64-bit FNV-1a; must not change between builds.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// `#rrggbb` form, for HTML output.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ---------------------------------------------------------------------------
// Year row tints
// ---------------------------------------------------------------------------

/// Row background for the table and print view, keyed on the year label.
pub fn year_row_tint(year: &str) -> Option<Color32> {
    year_class(year).map(|class| match class {
        "first-year" => Color32::from_rgb(0xe8, 0xf4, 0xfc),
        "second-year" => Color32::from_rgb(0xe8, 0xf8, 0xf5),
        _ => Color32::from_rgb(0xf9, 0xf2, 0xe8),
    })
}

/// CSS class for a year label, if it is one of the three plan years.
pub fn year_class(year: &str) -> Option<&'static str> {
    if year.contains("Primo anno") {
        Some("first-year")
    } else if year.contains("Secondo anno") {
        Some("second-year")
    } else if year.contains("Terzo anno") {
        Some("third-year")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Colours for every category of a dataset, in category order.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: Vec<(String, Color32)>,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        ColorMap {
            entries: categories
                .iter()
                .map(|c| (c.clone(), color_for(c)))
                .collect(),
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| *color)
            .unwrap_or_else(|| color_for(category))
    }

    /// Legend entries (category → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_use_fixed_palette() {
        assert_eq!(color_for("Raccolta dati"), Color32::from_rgb(0x34, 0x98, 0xdb));
        assert_eq!(to_hex(color_for("Analisi dati")), "#1abc9c");
    }

    #[test]
    fn unknown_categories_are_stable() {
        let a = color_for("Tirocinio");
        assert_eq!(a, color_for("Tirocinio"));
        assert_eq!(a, ColorMap::new(&["Tirocinio".to_string()]).color_for("Tirocinio"));
    }

    #[test]
    fn year_tints() {
        assert_eq!(year_class("Primo anno"), Some("first-year"));
        assert_eq!(year_class("Terzo anno (estero)"), Some("third-year"));
        assert_eq!(year_class("2025"), None);
        assert!(year_row_tint("Secondo anno").is_some());
        assert!(year_row_tint("Quarto anno").is_none());
    }

    #[test]
    fn map_keeps_category_order() {
        let cats = vec!["Analisi dati".to_string(), "Raccolta dati".to_string()];
        let map = ColorMap::new(&cats);
        let names: Vec<_> = map.legend_entries().iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Analisi dati", "Raccolta dati"]);
    }
}
