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
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Chart series colours
// ---------------------------------------------------------------------------

/// One colour per plotted series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub monthly: Color32,
    pub smoothed: Color32,
    pub folded: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let palette = generate_palette(3);
        Self {
            monthly: palette[0],
            smoothed: palette[1],
            folded: palette[2],
        }
    }
}
