use serde::{Deserialize, Serialize};

use crate::api::error::OrreryError;

/// How animation ticks are derived from host frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickMode {
    /// One tick per rendered frame. Speed follows the display refresh rate.
    PerFrame,
    /// Frame deltas accumulate; each full `dt` seconds is one tick.
    FixedStep { dt: f32 },
}

impl Default for TickMode {
    fn default() -> Self {
        TickMode::FixedStep { dt: 1.0 / 60.0 }
    }
}

/// Source of the visual radius budget that the outermost orbit is scaled to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualBudget {
    /// A constant, in world units.
    Fixed { radius: f32 },
    /// Half the smaller viewport dimension, sampled once at mount.
    HalfViewport,
}

impl VisualBudget {
    /// Resolve to world units for a viewport of the given size.
    pub fn resolve(self, viewport_width: f32, viewport_height: f32) -> f32 {
        match self {
            VisualBudget::Fixed { radius } => radius,
            VisualBudget::HalfViewport => viewport_width.min(viewport_height) / 2.0,
        }
    }
}

impl Default for VisualBudget {
    fn default() -> Self {
        VisualBudget::Fixed { radius: 10.0 }
    }
}

/// Camera projection style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Perspective camera orbiting the star.
    #[default]
    Orbit,
    /// Top-down orthographic view of the orbital plane.
    Flat,
}

/// Phase advancement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Radians per tick for a body whose period is 1.
    pub base_angular_rate: f64,
    /// Period substituted when a body has none (days).
    pub default_period: f64,
    pub tick_mode: TickMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_angular_rate: 0.01,
            default_period: 365.0,
            tick_mode: TickMode::default(),
        }
    }
}

/// Layout scaling and body sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub budget: VisualBudget,
    /// Smallest visual body size.
    pub min_body_size: f32,
    /// Multiplier on `ln(1 + radius)` above the floor.
    pub body_size_log_scale: f32,
    /// World units per visual size unit (sphere radius = size * this).
    pub size_to_world: f32,
    /// Body colors, assigned by placement index.
    pub palette: Vec<[f32; 3]>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            budget: VisualBudget::default(),
            min_body_size: 10.0,
            body_size_log_scale: 10.0,
            size_to_world: 0.05,
            palette: vec![
                [79.0 / 256.0, 76.0 / 256.0, 176.0 / 256.0],
                [107.0 / 256.0, 147.0 / 256.0, 214.0 / 256.0],
                [233.0 / 256.0, 239.0 / 256.0, 249.0 / 256.0],
                [159.0 / 256.0, 193.0 / 256.0, 100.0 / 256.0],
                [216.0 / 256.0, 197.0 / 256.0, 150.0 / 256.0],
            ],
        }
    }
}

/// Camera defaults and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub view: ViewMode,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub elevation_degrees: f32,
    /// Fraction of the remaining distance to the goal covered per 60 Hz frame.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::Orbit,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 30.0,
            elevation_degrees: 30.0,
            damping: 0.05,
            min_distance: 2.0,
            max_distance: 200.0,
        }
    }
}

/// Orbit guide ring appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    pub samples: usize,
    /// Stroke width in pixels.
    pub width: f32,
    pub alpha: f32,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            samples: 64,
            width: 1.0,
            alpha: 0.4,
        }
    }
}

/// Central star appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// World radius.
    pub radius: f32,
    pub color: [f32; 3],
    pub emissive: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: [1.0, 1.0, 0.0],
            emissive: 2.0,
        }
    }
}

/// Configuration for an orrery session. Every field has a default, so
/// `{}` is a valid config document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub animation: AnimationConfig,
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub guides: GuideConfig,
    pub star: StarConfig,
}

impl OrreryConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = OrreryConfig::from_json("{}").unwrap();
        assert_eq!(config.animation.default_period, 365.0);
        assert_eq!(config.layout.min_body_size, 10.0);
        assert_eq!(config.layout.palette.len(), 5);
        assert_eq!(config.camera.view, ViewMode::Orbit);
        assert_eq!(config.animation.tick_mode, TickMode::FixedStep { dt: 1.0 / 60.0 });
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "animation": { "tick_mode": { "kind": "per_frame" } },
            "layout": { "budget": { "kind": "half_viewport" } },
            "camera": { "view": "flat" }
        }"#;
        let config = OrreryConfig::from_json(json).unwrap();
        assert_eq!(config.animation.tick_mode, TickMode::PerFrame);
        assert_eq!(config.animation.base_angular_rate, 0.01);
        assert_eq!(config.layout.budget, VisualBudget::HalfViewport);
        assert_eq!(config.camera.view, ViewMode::Flat);
        assert_eq!(config.camera.fov_y_degrees, 75.0);
    }

    #[test]
    fn malformed_json_is_catalog_error() {
        let err = OrreryConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, OrreryError::Catalog(_)));
    }

    #[test]
    fn budget_resolution() {
        assert_eq!(VisualBudget::Fixed { radius: 10.0 }.resolve(800.0, 600.0), 10.0);
        assert_eq!(VisualBudget::HalfViewport.resolve(800.0, 600.0), 300.0);
    }
}
