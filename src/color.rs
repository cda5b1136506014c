use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::report::risk::RiskLevel;

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

/// Contributions that push the score up (towards attrition).
pub const POSITIVE: Color32 = Color32::from_rgb(255, 0, 82);
/// Contributions that pull the score down.
pub const NEGATIVE: Color32 = Color32::from_rgb(0, 138, 250);
/// Neutral bars (global importance).
pub const NEUTRAL: Color32 = Color32::from_rgb(70, 130, 180);
/// Dots whose colour axis is undefined.
pub const MISSING: Color32 = Color32::GRAY;

pub fn contribution_color(attribution: f64) -> Color32 {
    if attribution > 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

pub fn risk_color(risk: RiskLevel) -> Color32 {
    match risk {
        RiskLevel::High => Color32::from_rgb(220, 50, 47),
        RiskLevel::Medium => Color32::from_rgb(230, 170, 0),
        RiskLevel::Low => Color32::from_rgb(40, 160, 70),
    }
}

// ---------------------------------------------------------------------------
// Value gradient: low (blue) → high (red), through purple
// ---------------------------------------------------------------------------

const LOW_HUE: f32 = 207.0;
const HIGH_HUE: f32 = 341.0;

/// Colour for a value already scaled to [0, 1].
pub fn value_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let hsl = Hsl::new(LOW_HUE + t * (HIGH_HUE - LOW_HUE), 1.0, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Number of discrete steps the gradient is drawn with.
pub const GRADIENT_STEPS: usize = 11;

/// Bucket a scaled value so dots can be drawn in a few batches.
pub fn gradient_bucket(t: f64) -> usize {
    (t.clamp(0.0, 1.0) * (GRADIENT_STEPS - 1) as f64).round() as usize
}

/// Representative colour of a bucket from [`gradient_bucket`].
pub fn bucket_color(bucket: usize) -> Color32 {
    value_color(bucket as f64 / (GRADIENT_STEPS - 1) as f64)
}
