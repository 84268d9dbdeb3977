//! Parameter bundle handed to a tween at bind time.
//!
//! A context carries every start/end value any kind might need. Each kind
//! reads only the subset it cares about; the rest stay at their defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// RGBA color in gamma-encoded sRGB, components in `0.0..=1.0`.
pub type Color = palette::Srgba<f32>;

/// Start and end values for one tween.
///
/// Copied into the tween by value and never mutated while the tween runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenContext {
    /// Free-form key, e.g. the material property a [`MaterialFloat`] drives.
    ///
    /// [`MaterialFloat`]: crate::library::MaterialFloat
    pub key: String,
    /// Starting scale for vector tweens.
    pub base_scale: Vec3,
    /// Final scale for vector tweens.
    pub target_scale: Vec3,
    /// Starting color for color tweens.
    pub base_color: Color,
    /// Final color for color tweens.
    pub target_color: Color,
    /// Starting scalar for float tweens.
    pub base_value: f32,
    /// Final scalar for float tweens.
    pub target_value: f32,
    /// Per-axis weight applied to the scale delta, expected in `0.0..=1.0`.
    pub influence: Vec3,
}

impl Default for TweenContext {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_scale: Vec3::ONE,
            target_scale: Vec3::ONE,
            base_color: Color::new(0.0, 0.0, 0.0, 1.0),
            target_color: Color::new(0.0, 0.0, 0.0, 1.0),
            base_value: 0.0,
            target_value: 0.0,
            influence: Vec3::ONE,
        }
    }
}

impl TweenContext {
    /// Context for a scalar tween from `base` to `target`.
    pub fn values(base: f32, target: f32) -> Self {
        Self::default().with_values(base, target)
    }

    /// Context for a color tween from `base` to `target`.
    pub fn colors(base: Color, target: Color) -> Self {
        Self::default().with_colors(base, target)
    }

    /// Context for a scale tween from `base` to `target` with full influence.
    pub fn scales(base: Vec3, target: Vec3) -> Self {
        Self::default().with_scales(base, target)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_values(mut self, base: f32, target: f32) -> Self {
        self.base_value = base;
        self.target_value = target;
        self
    }

    pub fn with_colors(mut self, base: Color, target: Color) -> Self {
        self.base_color = base;
        self.target_color = target;
        self
    }

    pub fn with_scales(mut self, base: Vec3, target: Vec3) -> Self {
        self.base_scale = base;
        self.target_scale = target;
        self
    }

    pub fn with_influence(mut self, influence: Vec3) -> Self {
        self.influence = influence;
        self
    }
}

/// Linear interpolation that lands exactly on `a` at `t = 0` and on `b` at
/// `t = 1`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Componentwise [`lerp`] over a vector.
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Componentwise [`lerp`] over the encoded color channels, alpha included.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        lerp(a.red, b.red, t),
        lerp(a.green, b.green, t),
        lerp(a.blue, b.blue, t),
        lerp(a.alpha, b.alpha, t),
    )
}
