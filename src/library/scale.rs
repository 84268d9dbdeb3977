//! Local-scale tweens with per-axis influence.

use std::marker::PhantomData;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{lerp_vec3, Interpolation, TweenContext};

/// Anything with a local scale.
pub trait Scalable {
    fn set_local_scale(&mut self, scale: Vec3);
}

/// Scene node transform. Only scale is animated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub local_scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            local_scale: Vec3::ONE,
        }
    }
}

impl Scalable for Transform {
    fn set_local_scale(&mut self, scale: Vec3) {
        self.local_scale = scale;
    }
}

/// Scales from `base_scale` towards `target_scale`.
///
/// `influence` weights the delta per axis, so `Vec3::X` only grows the x
/// axis. Cancelling applies the raw `target_scale`, ignoring influence.
pub struct ScaleTo<T = Transform>(PhantomData<fn() -> T>);

impl<T: Scalable + 'static> Interpolation for ScaleTo<T> {
    type Target = T;
    const NAME: &'static str = "scale";

    fn initialize(target: &mut T, context: &TweenContext) {
        target.set_local_scale(context.base_scale);
    }

    fn advance(target: &mut T, context: &TweenContext, progress: f32) {
        let base = context.base_scale;
        let influenced = base + (context.target_scale - base) * context.influence;
        target.set_local_scale(lerp_vec3(base, influenced, progress));
    }

    fn snap_to_end(target: &mut T, context: &TweenContext) {
        target.set_local_scale(context.target_scale);
    }
}
