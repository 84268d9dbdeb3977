//! Core task model: contexts, target handles and the tween lifecycle.

pub mod context;
pub mod target;
pub mod tween;

pub use context::{lerp, lerp_color, lerp_vec3, Color, TweenContext};
pub use target::{Target, TargetId};
pub use tween::{AnyTween, Callback, Interpolation, KindTag, Tween, TweenId, TweenState};
