//! The tween controller: active list, reserve pool and the tick loop.
//!
//! The controller owns every tween it hands out. Callers borrow a tween from
//! [`TweenController::acquire`] just long enough to bind it; from then on the
//! controller advances it once per [`TweenController::tick`] and returns it to
//! the reserve when it finishes or is cancelled.

use serde::{Deserialize, Serialize};

use super::command::{Command, CommandQueue, CommandSender};
use super::pool::Reserve;
use crate::core::{AnyTween, Interpolation, KindTag, TargetId, Tween};
use crate::{tlog_debug, tlog_trace, tlog_warn};

/// Controller tuning, loaded from the `[controller]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Initial capacity of the active list.
    pub active_capacity: usize,
    /// Initial capacity of the reserve list.
    pub reserve_capacity: usize,
    /// Maximum pooled tweens kept per kind. `None` keeps all of them.
    pub max_reserve_per_kind: Option<usize>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            active_capacity: 64,
            reserve_capacity: 64,
            max_reserve_per_kind: None,
        }
    }
}

/// Lifetime counters, mostly useful for checking pool effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStats {
    /// Tweens constructed because the reserve had none of the kind.
    pub created: u64,
    /// Acquisitions served from the reserve.
    pub reused: u64,
    /// Tweens that ran to their duration.
    pub completed: u64,
    /// Tweens removed by target or blanket cancellation.
    pub cancelled: u64,
    /// Finished tweens dropped because the reserve was at its cap.
    pub dropped: u64,
}

/// Scheduler and pool for all running tweens.
///
/// One controller is created by the host and passed to whatever owns the
/// frame loop. It is single-threaded; use [`TweenController::command_sender`]
/// to cancel from other threads.
///
/// # Example
///
/// ```
/// use tween::core::{Target, TweenContext};
/// use tween::library::{AlphaFade, CanvasGroup};
/// use tween::scheduler::TweenController;
///
/// let panel = Target::new(CanvasGroup::default());
/// let mut controller = TweenController::new();
///
/// controller
///     .acquire::<AlphaFade>()
///     .bind(&panel, 0.25, TweenContext::values(0.0, 1.0));
///
/// controller.tick(0.25);
/// assert_eq!(panel.borrow().alpha, 1.0);
/// assert!(controller.is_idle());
/// ```
pub struct TweenController {
    /// Tweens receiving updates.
    active: Vec<Box<dyn AnyTween>>,
    /// Unbound tweens available for reuse.
    reserve: Reserve,
    /// Requests queued from other threads.
    commands: CommandQueue,
    stats: ControllerStats,
}

impl TweenController {
    pub fn new() -> Self {
        Self::with_config(&ControllerConfig::default())
    }

    pub fn with_config(config: &ControllerConfig) -> Self {
        Self {
            active: Vec::with_capacity(config.active_capacity),
            reserve: Reserve::new(config.reserve_capacity, config.max_reserve_per_kind),
            commands: CommandQueue::new(),
            stats: ControllerStats::default(),
        }
    }

    /// Hand out a tween of kind `K`, reusing a pooled one when possible.
    ///
    /// The tween is already in the active list but unbound; bind it before
    /// the next [`tick`](Self::tick), which panics on unbound tweens.
    pub fn acquire<K: Interpolation>(&mut self) -> &mut Tween<K> {
        let kind = KindTag::of::<K>();
        let tween = match self.reserve.take(kind) {
            Some(mut pooled) => {
                pooled.reset();
                self.stats.reused += 1;
                tlog_trace!("acquire {:?}: reused {}", kind, pooled.id().short());
                pooled
            }
            None => {
                self.stats.created += 1;
                let created: Box<dyn AnyTween> = Box::new(Tween::<K>::new());
                tlog_trace!("acquire {:?}: created {}", kind, created.id().short());
                created
            }
        };
        self.active.push(tween);

        let last = self.active.len() - 1;
        match self.active[last].as_any_mut().downcast_mut::<Tween<K>>() {
            Some(tween) => tween,
            None => unreachable!("reserve returned a tween whose tag is not {:?}", kind),
        }
    }

    /// Fill the reserve with `count` fresh tweens of kind `K`.
    ///
    /// Returns how many were actually retained under the reserve cap.
    pub fn prewarm<K: Interpolation>(&mut self, count: usize) -> usize {
        let mut kept = 0;
        for _ in 0..count {
            self.stats.created += 1;
            if self.reserve.put(Box::new(Tween::<K>::new())) {
                kept += 1;
            } else {
                self.stats.dropped += 1;
            }
        }
        tlog_debug!("prewarm {:?}: {} of {}", KindTag::of::<K>(), kept, count);
        kept
    }

    /// Advance every active tween by `delta` seconds.
    ///
    /// Queued commands are applied first. Each active tween is updated
    /// exactly once; tweens reporting completion have their callback run and
    /// go back to the reserve.
    ///
    /// # Panics
    ///
    /// Panics if an acquired tween was never bound.
    pub fn tick(&mut self, delta: f32) {
        self.apply_commands();

        if self.active.is_empty() {
            return;
        }
        let delta = if delta.is_nan() || delta < 0.0 {
            tlog_warn!("tick with invalid delta {}, clamping to 0", delta);
            0.0
        } else {
            delta
        };

        // Walk backwards: swap_remove pulls an already-updated tween into the
        // vacated slot, so nothing is skipped or updated twice.
        for i in (0..self.active.len()).rev() {
            if self.active[i].update(delta) {
                let mut finished = self.active.swap_remove(i);
                tlog_trace!(
                    "{:?} tween {} completed",
                    finished.kind(),
                    finished.id().short()
                );
                finished.complete(true);
                self.stats.completed += 1;
                self.recycle(finished);
            }
        }
    }

    /// Stop every active tween bound to `target` and return it to the pool.
    ///
    /// Tweens are completed, not snapped: the target keeps whatever value the
    /// last tick applied. Returns the number of tweens stopped; a target with
    /// no tweens is a no-op.
    pub fn cancel_by_target(
        &mut self,
        target: impl Into<TargetId>,
        invoke_callback: bool,
    ) -> usize {
        let target = target.into();
        let cancelled =
            self.remove_where(|t| t.untyped_target() == Some(target), invoke_callback);
        if cancelled > 0 {
            tlog_debug!("cancelled {} tween(s) on {}", cancelled, target);
        }
        cancelled
    }

    /// [`cancel_by_target`](Self::cancel_by_target) with callbacks enabled.
    pub fn cancel(&mut self, target: impl Into<TargetId>) -> usize {
        self.cancel_by_target(target, true)
    }

    /// Stop every active tween.
    pub fn cancel_all(&mut self, invoke_callback: bool) -> usize {
        let cancelled = self.remove_where(|_| true, invoke_callback);
        tlog_debug!("cancelled all {} active tween(s)", cancelled);
        cancelled
    }

    /// Sender for queueing cancellations from any thread.
    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn reserve_count(&self) -> usize {
        self.reserve.len()
    }

    /// Pooled tweens of kind `K`.
    pub fn reserved_of<K: Interpolation>(&self) -> usize {
        self.reserve.count_of(KindTag::of::<K>())
    }

    /// Whether no tween is active.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of active tweens bound to `target`.
    pub fn active_on(&self, target: impl Into<TargetId>) -> usize {
        let target = target.into();
        self.active
            .iter()
            .filter(|t| t.untyped_target() == Some(target))
            .count()
    }

    /// Iterate active tweens. Order is unspecified.
    pub fn active(&self) -> impl Iterator<Item = &(dyn AnyTween + 'static)> + '_ {
        self.active.iter().map(|t| t.as_ref())
    }

    /// Iterate pooled tweens, oldest first.
    pub fn reserved(&self) -> impl Iterator<Item = &(dyn AnyTween + 'static)> + '_ {
        self.reserve.iter()
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    fn apply_commands(&mut self) {
        for command in self.commands.drain() {
            tlog_trace!("applying queued {:?}", command);
            match command {
                Command::CancelTarget {
                    target,
                    invoke_callback,
                } => {
                    self.cancel_by_target(target, invoke_callback);
                }
                Command::CancelAll { invoke_callback } => {
                    self.cancel_all(invoke_callback);
                }
            }
        }
    }

    fn remove_where<F>(&mut self, mut matches: F, invoke_callback: bool) -> usize
    where
        F: FnMut(&dyn AnyTween) -> bool,
    {
        let mut removed = 0;
        for i in (0..self.active.len()).rev() {
            if matches(self.active[i].as_ref()) {
                let mut tween = self.active.swap_remove(i);
                tween.complete(invoke_callback);
                self.stats.cancelled += 1;
                self.recycle(tween);
                removed += 1;
            }
        }
        removed
    }

    fn recycle(&mut self, mut tween: Box<dyn AnyTween>) {
        // Pooled tweens hold neither a target nor a callback.
        tween.reset();
        if !self.reserve.put(tween) {
            self.stats.dropped += 1;
        }
    }
}

impl Default for TweenController {
    fn default() -> Self {
        Self::new()
    }
}
