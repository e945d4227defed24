//! Measurement normalization.
//!
//! Turns raw catalog measurements (possibly absent, zero or NaN) into values
//! that are safe to divide by and to place on an orbit.

use crate::assets::catalog::{OrbitingBody, PlanetDetail};

/// Period used when the configured default is itself unusable.
const FALLBACK_PERIOD: f64 = 365.0;

/// Measurements of one placeable body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBody {
    /// Raw distance from the star, strictly positive.
    pub distance: f64,
    /// Orbital period, strictly positive.
    pub period: f64,
    /// Visual size, at least the configured floor.
    pub size: f32,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// A usable distance, or `None` when the body cannot be placed.
pub fn normalize_distance(raw: Option<f64>) -> Option<f64> {
    positive(raw)
}

/// The body's period, or `default_period` when missing or degenerate.
pub fn normalize_period(raw: Option<f64>, default_period: f64) -> f64 {
    positive(raw)
        .or_else(|| positive(Some(default_period)))
        .unwrap_or(FALLBACK_PERIOD)
}

/// Log-compressed visual size: `floor + log_scale * ln(1 + r)`.
///
/// Absent, negative and NaN radii render at the floor.
pub fn visual_size(radius: Option<f64>, floor: f32, log_scale: f32) -> f32 {
    let r = radius.filter(|r| r.is_finite()).unwrap_or(0.0).max(0.0);
    let size = floor as f64 + log_scale.max(0.0) as f64 * r.ln_1p();
    (size as f32).max(floor)
}

/// Normalize one body against its detail record.
///
/// Returns `None` when the distance is missing. The detail radius wins over
/// the body-list radius when both are present.
pub fn normalize(
    body: &OrbitingBody,
    detail: &PlanetDetail,
    default_period: f64,
    size_floor: f32,
    size_log_scale: f32,
) -> Option<NormalizedBody> {
    let distance = normalize_distance(body.distance)?;
    let period = normalize_period(
        positive(body.period).or(positive(detail.period)),
        default_period,
    );
    let size = visual_size(detail.radius.or(body.radius), size_floor, size_log_scale);
    Some(NormalizedBody {
        distance,
        period,
        size,
    })
}
