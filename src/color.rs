use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed colours for the two preservatives
// ---------------------------------------------------------------------------

/// Colours of the benzoate and sorbate series, shared by chart and labels.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub benzoate: Color32,
    pub sorbate: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let palette = generate_palette(2);
        Self {
            benzoate: palette[0],
            sorbate: palette[1],
        }
    }
}

/// Background of rows above a safety limit (#ffcccc).
pub const UNSAFE_ROW: Color32 = Color32::from_rgb(0xff, 0xcc, 0xcc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(2);
        assert_eq!(p.len(), 2);
        assert_ne!(p[0], p[1]);
    }
}
