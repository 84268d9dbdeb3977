//! Pool reuse tests: finished tweens return to the reserve and are handed
//! out again by kind.

use std::collections::HashSet;

use tween::core::{TweenId, TweenState};
use tween::library::{
    AlphaFade, Behaviour, CanvasGroup, ColorBlend, DelayedTrigger, Fade, Graphic,
};
use tween::{ControllerConfig, Target, TweenContext, TweenController};

use crate::fixtures::{run_until_idle, CallLog, FRAME};

fn fade(controller: &mut TweenController, panel: &Target<CanvasGroup>) -> TweenId {
    controller
        .acquire::<AlphaFade>()
        .bind(panel, FRAME, TweenContext::values(0.0, 1.0))
        .id()
}

/// Test: Burst reuse
/// Given a burst of 8 fades that has finished
/// When a second burst of 8 is started
/// Then every tween of the second burst is one from the first
#[test]
fn test_second_burst_reuses_first() {
    let mut controller = TweenController::new();
    let panel = Target::new(CanvasGroup::default());

    let first: HashSet<TweenId> = (0..8).map(|_| fade(&mut controller, &panel)).collect();
    controller.tick(FRAME);
    assert_eq!(controller.reserve_count(), 8);

    let second: HashSet<TweenId> = (0..8).map(|_| fade(&mut controller, &panel)).collect();
    assert_eq!(first, second);
    assert_eq!(controller.reserve_count(), 0);
    assert_eq!(controller.stats().created, 8);
    assert_eq!(controller.stats().reused, 8);
}

/// Test: The pool is partitioned by kind
#[test]
fn test_reserve_is_partitioned_by_kind() {
    let mut controller = TweenController::new();
    let panel = Target::new(CanvasGroup::default());
    let icon = Target::new(Graphic::default());

    fade(&mut controller, &panel);
    controller.tick(FRAME);
    assert_eq!(controller.reserved_of::<AlphaFade>(), 1);

    controller
        .acquire::<ColorBlend>()
        .bind(&icon, 1.0, TweenContext::default());
    assert_eq!(controller.reserved_of::<AlphaFade>(), 1);
    assert_eq!(controller.stats().created, 2);
}

struct Label {
    opacity: f32,
}

impl Fade for Label {
    fn set_alpha(&mut self, alpha: f32) {
        self.opacity = alpha;
    }
}

/// Test: Same kind over different target types pools separately
#[test]
fn test_generic_kinds_pool_per_target_type() {
    let mut controller = TweenController::new();
    let panel = Target::new(CanvasGroup::default());
    let label = Target::new(Label { opacity: 0.0 });

    fade(&mut controller, &panel);
    controller.tick(FRAME);

    controller
        .acquire::<AlphaFade<Label>>()
        .bind(&label, 1.0, TweenContext::values(0.0, 1.0));
    assert_eq!(controller.reserved_of::<AlphaFade>(), 1);
    assert_eq!(controller.reserved_of::<AlphaFade<Label>>(), 0);
    assert_eq!(label.borrow().opacity, 0.0);
}

/// Test: A reused tween starts clean
/// Given a tween cancelled without running its callback
/// When it sits in the reserve and is later reused
/// Then it holds no target while pooled and only the new callback runs
#[test]
fn test_reused_tween_carries_no_old_state() {
    let mut controller = TweenController::new();
    let log = CallLog::new();
    let old = Target::new(Behaviour::named("old"));
    let new = Target::new(Behaviour::named("new"));

    let first = controller
        .acquire::<DelayedTrigger>()
        .bind(&old, 10.0, TweenContext::default())
        .on_complete(log.callback("old"))
        .id();
    controller.tick(3.0);
    controller.cancel_by_target(&old, false);

    let pooled = controller
        .reserved()
        .next()
        .map(|t| (t.id(), t.state(), t.elapsed(), t.untyped_target()));
    assert_eq!(pooled, Some((first, TweenState::Unbound, 0.0, None)));

    let reused = controller.acquire::<DelayedTrigger>();
    assert_eq!(reused.id(), first);
    assert_eq!(reused.state(), TweenState::Unbound);
    assert_eq!(reused.elapsed(), 0.0);
    assert!(reused.target().is_none());
    assert!(!reused.has_callback());

    reused
        .bind(&new, 0.5, TweenContext::default())
        .on_complete(log.callback("new"));
    run_until_idle(&mut controller, 0.25, 4);

    assert_eq!(log.calls(), vec!["new"]);
}

/// Test: Prewarmed tweens are handed out without construction
#[test]
fn test_prewarm_serves_later_acquires() {
    let mut controller = TweenController::new();
    assert_eq!(controller.prewarm::<AlphaFade>(4), 4);
    let created = controller.stats().created;

    let panel = Target::new(CanvasGroup::default());
    for _ in 0..4 {
        fade(&mut controller, &panel);
    }
    assert_eq!(controller.stats().created, created);
    assert_eq!(controller.stats().reused, 4);
}

/// Test: Configured retention cap bounds the reserve
#[test]
fn test_retention_cap_from_config() {
    let config = ControllerConfig {
        max_reserve_per_kind: Some(2),
        ..ControllerConfig::default()
    };
    let mut controller = TweenController::with_config(&config);
    let panel = Target::new(CanvasGroup::default());

    for _ in 0..5 {
        fade(&mut controller, &panel);
    }
    controller.tick(FRAME);

    assert_eq!(controller.reserve_count(), 2);
    assert_eq!(controller.stats().completed, 5);
    assert_eq!(controller.stats().dropped, 3);
}
