use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Channel;

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
// Channel colours: one stable colour per sensor channel
// ---------------------------------------------------------------------------

/// Maps every [`Channel`] to its own colour, so a sensor keeps the same
/// colour across all four charts and across selections.
#[derive(Debug, Clone)]
pub struct ChannelColors {
    colors: Vec<Color32>,
}

impl Default for ChannelColors {
    fn default() -> Self {
        Self {
            colors: generate_palette(Channel::COUNT),
        }
    }
}

impl ChannelColors {
    pub fn color_for(&self, channel: Channel) -> Color32 {
        self.colors
            .get(channel.index())
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_len() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn test_channel_colors_are_distinct() {
        let colors = ChannelColors::default();
        for (i, a) in Channel::ALL.iter().enumerate() {
            for b in &Channel::ALL[i + 1..] {
                assert_ne!(colors.color_for(*a), colors.color_for(*b), "{a} vs {b}");
            }
        }
    }
}
