//! Named float parameters on a material, e.g. dissolve or highlight amounts.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::core::{lerp, Interpolation, TweenContext};

/// Anything exposing named float parameters.
pub trait MaterialParams {
    fn set_float(&mut self, key: &str, value: f32);
}

/// Shader parameter block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub floats: BTreeMap<String, f32>,
}

impl Material {
    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.floats.get(key).copied()
    }
}

impl MaterialParams for Material {
    fn set_float(&mut self, key: &str, value: f32) {
        match self.floats.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.floats.insert(key.to_string(), value);
            }
        }
    }
}

/// An image drawn with its own material instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub material: Material,
}

impl MaterialParams for Image {
    fn set_float(&mut self, key: &str, value: f32) {
        self.material.set_float(key, value);
    }
}

/// Drives the parameter named by the context `key` from `base_value` to
/// `target_value`.
pub struct MaterialFloat<T = Image>(PhantomData<fn() -> T>);

impl<T: MaterialParams + 'static> Interpolation for MaterialFloat<T> {
    type Target = T;
    const NAME: &'static str = "material";

    fn initialize(target: &mut T, context: &TweenContext) {
        target.set_float(&context.key, context.base_value);
    }

    fn advance(target: &mut T, context: &TweenContext, progress: f32) {
        target.set_float(
            &context.key,
            lerp(context.base_value, context.target_value, progress),
        );
    }

    fn snap_to_end(target: &mut T, context: &TweenContext) {
        target.set_float(&context.key, context.target_value);
    }
}
