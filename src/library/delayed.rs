//! Pure timers: the tween system used as a delayed callback.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::core::{Interpolation, TweenContext};

/// Host component used as the anchor of a delayed trigger, so the trigger can
/// be cancelled along with everything else bound to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behaviour {
    pub name: String,
}

impl Behaviour {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Completes after its duration without touching the target.
pub struct DelayedTrigger<T = Behaviour>(PhantomData<fn() -> T>);

impl<T: 'static> Interpolation for DelayedTrigger<T> {
    type Target = T;
    const NAME: &'static str = "delayed_trigger";

    fn initialize(_target: &mut T, _context: &TweenContext) {}

    fn advance(_target: &mut T, _context: &TweenContext, _progress: f32) {}

    fn snap_to_end(_target: &mut T, _context: &TweenContext) {}
}
