//! The tween task: timer bookkeeping around a kind-specific formula.
//!
//! A [`Tween`] owns the elapsed time, duration, target handle, context and
//! completion callback. What it does to the target is delegated to an
//! [`Interpolation`] kind, so every kind shares one lifecycle:
//!
//! ```text
//! unbound --bind--> bound --update..--> due --complete--> (reset) unbound
//!                        \--cancel--> cancelled --------/
//! ```

use std::any::{Any, TypeId};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::TweenContext;
use super::target::{Target, TargetId};
use crate::tlog_warn;

/// Unique identifier for a tween instance.
///
/// Assigned once at construction and kept across resets, so a pooled tween
/// can be recognised when it is handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweenId(pub Uuid);

impl TweenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TweenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a tween is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenState {
    /// Freshly constructed or reset; holds no target.
    #[default]
    Unbound,
    /// Bound to a target and advancing.
    Bound,
    /// Reported due and was completed.
    Completed,
    /// Snapped to its end value before becoming due.
    Cancelled,
}

impl fmt::Display for TweenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweenState::Unbound => write!(f, "unbound"),
            TweenState::Bound => write!(f, "bound"),
            TweenState::Completed => write!(f, "completed"),
            TweenState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Completion callback. Runs at most once per binding.
pub type Callback = Box<dyn FnOnce()>;

/// The capability set a tween kind provides.
///
/// Kinds are stateless: everything they need arrives through the target and
/// the context. Implementors are usually zero-sized marker types.
pub trait Interpolation: 'static {
    /// Object this kind animates.
    type Target: 'static;

    /// Short human-readable name used in logs.
    const NAME: &'static str;

    /// Apply the context's start value so the first frame does not jump.
    fn initialize(target: &mut Self::Target, context: &TweenContext);

    /// Apply the value for `progress` in `0.0..=1.0`.
    fn advance(target: &mut Self::Target, context: &TweenContext, progress: f32);

    /// Apply the context's end value immediately.
    fn snap_to_end(target: &mut Self::Target, context: &TweenContext);
}

/// Runtime tag identifying a tween kind.
///
/// Stored next to every pooled tween so the reserve can be searched by exact
/// tag comparison.
#[derive(Clone, Copy)]
pub struct KindTag {
    id: TypeId,
    name: &'static str,
}

impl KindTag {
    pub fn of<K: Interpolation>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: K::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for KindTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for KindTag {}

impl std::hash::Hash for KindTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A single interpolation task of kind `K`.
pub struct Tween<K: Interpolation> {
    id: TweenId,
    duration: f32,
    elapsed: f32,
    target: Option<Target<K::Target>>,
    context: TweenContext,
    on_complete: Option<Callback>,
    state: TweenState,
}

impl<K: Interpolation> Tween<K> {
    /// Create an unbound tween.
    pub fn new() -> Self {
        Self {
            id: TweenId::new(),
            duration: 0.0,
            elapsed: 0.0,
            target: None,
            context: TweenContext::default(),
            on_complete: None,
            state: TweenState::Unbound,
        }
    }

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn kind(&self) -> KindTag {
        KindTag::of::<K>()
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn context(&self) -> &TweenContext {
        &self.context
    }

    pub fn target(&self) -> Option<&Target<K::Target>> {
        self.target.as_ref()
    }

    pub fn has_callback(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Identity of the bound target, if any.
    pub fn untyped_target(&self) -> Option<TargetId> {
        self.target.as_ref().map(Target::id)
    }

    /// Normalized progress in `0.0..=1.0`. A zero duration counts as done.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether the elapsed time has reached the duration.
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Bind to `target` for `duration` seconds and apply the start value.
    ///
    /// A negative or NaN duration is clamped to zero. Returns `self` so a callback
    /// can be chained with [`Tween::on_complete`].
    pub fn bind(
        &mut self,
        target: &Target<K::Target>,
        duration: f32,
        context: TweenContext,
    ) -> &mut Self {
        if duration.is_nan() || duration < 0.0 {
            tlog_warn!(
                "{} tween {} bound with invalid duration {}, clamping to 0",
                K::NAME,
                self.id.short(),
                duration
            );
        }
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.target = Some(target.clone());
        self.context = context;
        self.state = TweenState::Bound;
        K::initialize(&mut target.borrow_mut(), &self.context);
        self
    }

    /// Set the callback invoked by [`Tween::complete`].
    pub fn on_complete<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce() + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Advance by `delta` seconds, apply the new value and report whether the
    /// tween is due.
    ///
    /// # Panics
    ///
    /// Panics if the tween has never been bound.
    pub fn update(&mut self, delta: f32) -> bool {
        let delta = clamp_delta(delta);
        self.elapsed += delta;
        let progress = self.progress();
        let target = self.bound_target("update");
        K::advance(&mut target.borrow_mut(), &self.context, progress);
        self.is_due()
    }

    /// Stop early, leaving the target at its end value. Does not run the
    /// callback.
    ///
    /// # Panics
    ///
    /// Panics if the tween has never been bound.
    pub fn cancel(&mut self) {
        let target = self.bound_target("cancel");
        K::snap_to_end(&mut target.borrow_mut(), &self.context);
        self.state = TweenState::Cancelled;
    }

    /// Mark finished and, when `invoke_callback` is set, run the callback.
    pub fn complete(&mut self, invoke_callback: bool) {
        if self.state != TweenState::Cancelled {
            self.state = TweenState::Completed;
        }
        if !invoke_callback {
            return;
        }
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    /// Return to the unbound state. Duration and context are left in place
    /// and overwritten by the next bind.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.target = None;
        self.on_complete = None;
        self.state = TweenState::Unbound;
    }

    fn bound_target(&self, op: &str) -> &Target<K::Target> {
        match &self.target {
            Some(target) => target,
            None => panic!(
                "{} on unbound {} tween {}: bind it before driving it",
                op,
                K::NAME,
                self.id
            ),
        }
    }
}

impl<K: Interpolation> Default for Tween<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Interpolation> fmt::Debug for Tween<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("kind", &K::NAME)
            .field("id", &self.id)
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("target", &self.untyped_target())
            .field("has_callback", &self.has_callback())
            .finish()
    }
}

fn clamp_delta(delta: f32) -> f32 {
    if delta.is_nan() || delta < 0.0 {
        tlog_warn!("invalid delta {} clamped to 0", delta);
        0.0
    } else {
        delta
    }
}

/// Type-erased view of a tween, as the controller stores it.
pub trait AnyTween {
    fn id(&self) -> TweenId;
    fn kind(&self) -> KindTag;
    fn state(&self) -> TweenState;
    fn elapsed(&self) -> f32;
    fn duration(&self) -> f32;
    fn untyped_target(&self) -> Option<TargetId>;
    fn update(&mut self, delta: f32) -> bool;
    fn cancel(&mut self);
    fn complete(&mut self, invoke_callback: bool);
    fn reset(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: Interpolation> AnyTween for Tween<K> {
    fn id(&self) -> TweenId {
        self.id
    }

    fn kind(&self) -> KindTag {
        KindTag::of::<K>()
    }

    fn state(&self) -> TweenState {
        self.state
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn untyped_target(&self) -> Option<TargetId> {
        Tween::untyped_target(self)
    }

    fn update(&mut self, delta: f32) -> bool {
        Tween::update(self, delta)
    }

    fn cancel(&mut self) {
        Tween::cancel(self)
    }

    fn complete(&mut self, invoke_callback: bool) {
        Tween::complete(self, invoke_callback)
    }

    fn reset(&mut self) {
        Tween::reset(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
