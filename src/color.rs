use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::TrackConfig;

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
// Track colours
// ---------------------------------------------------------------------------

/// Line colour per track: the configured RGB when present, otherwise the
/// palette colour at the track's position.
pub fn track_colors(tracks: &[TrackConfig]) -> Vec<Color32> {
    let palette = generate_palette(tracks.len());
    tracks
        .iter()
        .zip(palette)
        .map(|(track, fallback)| match track.color {
            Some([r, g, b]) => Color32::from_rgb(r, g, b),
            None => fallback,
        })
        .collect()
}
