//! Color blends for graphics that carry a single tint.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::core::{lerp_color, Color, Interpolation, TweenContext};

/// Anything with a settable tint color.
pub trait Tint {
    fn set_color(&mut self, color: Color);
}

/// A drawable with a single tint, such as an image or a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graphic {
    pub color: Color,
}

impl Default for Graphic {
    fn default() -> Self {
        Self {
            color: Color::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Tint for Graphic {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// Blends `base_color` into `target_color`, alpha included.
pub struct ColorBlend<T = Graphic>(PhantomData<fn() -> T>);

impl<T: Tint + 'static> Interpolation for ColorBlend<T> {
    type Target = T;
    const NAME: &'static str = "color";

    fn initialize(target: &mut T, context: &TweenContext) {
        target.set_color(context.base_color);
    }

    fn advance(target: &mut T, context: &TweenContext, progress: f32) {
        target.set_color(lerp_color(
            context.base_color,
            context.target_color,
            progress,
        ));
    }

    fn snap_to_end(target: &mut T, context: &TweenContext) {
        target.set_color(context.target_color);
    }
}
