//! Alpha fades over every key of a line's color gradient.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::core::{lerp, Interpolation, TweenContext};

/// One alpha stop of a gradient. `time` is the position along the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaKey {
    pub alpha: f32,
    pub time: f32,
}

/// Color gradient; only the alpha stops are animated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gradient {
    pub alpha_keys: Vec<AlphaKey>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            alpha_keys: vec![
                AlphaKey {
                    alpha: 1.0,
                    time: 0.0,
                },
                AlphaKey {
                    alpha: 1.0,
                    time: 1.0,
                },
            ],
        }
    }
}

/// Anything whose gradient alpha stops can be rewritten.
pub trait AlphaKeyed {
    fn alpha_keys_mut(&mut self) -> &mut [AlphaKey];
}

/// Polyline renderer (paths, borders, selection outlines).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRenderer {
    pub gradient: Gradient,
}

impl AlphaKeyed for LineRenderer {
    fn alpha_keys_mut(&mut self) -> &mut [AlphaKey] {
        &mut self.gradient.alpha_keys
    }
}

/// Sets every gradient alpha stop to the interpolated value. Stop positions
/// are left alone.
pub struct LineAlpha<T = LineRenderer>(PhantomData<fn() -> T>);

impl<T: AlphaKeyed + 'static> LineAlpha<T> {
    fn set_alpha_keys(target: &mut T, context: &TweenContext, progress: f32) {
        let alpha = lerp(context.base_value, context.target_value, progress);
        for key in target.alpha_keys_mut() {
            key.alpha = alpha;
        }
    }
}

impl<T: AlphaKeyed + 'static> Interpolation for LineAlpha<T> {
    type Target = T;
    const NAME: &'static str = "line_alpha";

    fn initialize(target: &mut T, context: &TweenContext) {
        Self::set_alpha_keys(target, context, 0.0);
    }

    fn advance(target: &mut T, context: &TweenContext, progress: f32) {
        Self::set_alpha_keys(target, context, progress);
    }

    fn snap_to_end(target: &mut T, context: &TweenContext) {
        Self::set_alpha_keys(target, context, 1.0);
    }
}
