//! Scalar opacity fades, typically used for UI fade-in and fade-out.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::core::{lerp, Interpolation, TweenContext};

/// Anything with a single scalar opacity.
pub trait Fade {
    fn set_alpha(&mut self, alpha: f32);
}

/// Opacity group applied to a subtree of UI elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGroup {
    pub alpha: f32,
}

impl Default for CanvasGroup {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Fade for CanvasGroup {
    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}

/// Fades `base_value` to `target_value`.
pub struct AlphaFade<T = CanvasGroup>(PhantomData<fn() -> T>);

impl<T: Fade + 'static> Interpolation for AlphaFade<T> {
    type Target = T;
    const NAME: &'static str = "alpha";

    fn initialize(target: &mut T, context: &TweenContext) {
        target.set_alpha(context.base_value);
    }

    fn advance(target: &mut T, context: &TweenContext, progress: f32) {
        target.set_alpha(lerp(context.base_value, context.target_value, progress));
    }

    fn snap_to_end(target: &mut T, context: &TweenContext) {
        target.set_alpha(context.target_value);
    }
}
