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
            let hue = (i as f32 / n as f32) * 360.0;
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
// Series colours for the sensitivity chart
// ---------------------------------------------------------------------------

/// One colour per room-count curve; the curve matching the form is
/// highlighted, the rest are dimmed.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    colors: Vec<Color32>,
}

impl SeriesColors {
    pub fn new(n: usize) -> Self {
        Self {
            colors: generate_palette(n),
        }
    }

    pub fn color_for(&self, idx: usize, highlighted: bool) -> Color32 {
        let base = self.colors.get(idx).copied().unwrap_or(Color32::GRAY);
        if highlighted {
            base
        } else {
            base.gamma_multiply(0.45)
        }
    }
}
