//! Lifecycle tests: bind, per-frame progress, completion and callbacks
//! across every bundled kind.

use glam::Vec3;

use tween::core::Color;
use tween::library::{
    AlphaFade, CanvasGroup, ColorBlend, DelayedTrigger, Fade, Graphic, Image, LineAlpha,
    LineRenderer, MaterialFloat, ScaleTo, Transform,
};
use tween::{Target, TweenContext, TweenController, TweenState};

use crate::fixtures::{assert_close, run_frames, run_until_idle, CallLog, FRAME};

/// Test: Every bundled kind lands exactly on its end value
/// Given one tween of each kind on its own target
/// When the controller runs until idle
/// Then each target holds the end value and every callback ran once
#[test]
fn test_every_kind_reaches_end_value() {
    let mut controller = TweenController::new();
    let log = CallLog::new();

    let panel = Target::new(CanvasGroup::default());
    let icon = Target::new(Graphic::default());
    let node = Target::new(Transform::default());
    let portrait = Target::new(Image::default());
    let path = Target::new(LineRenderer::default());

    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let clear = Color::new(0.0, 0.0, 1.0, 0.0);

    controller
        .acquire::<AlphaFade>()
        .bind(&panel, 0.3, TweenContext::values(0.0, 1.0))
        .on_complete(log.callback("alpha"));
    controller
        .acquire::<ColorBlend>()
        .bind(&icon, 0.4, TweenContext::colors(red, clear))
        .on_complete(log.callback("color"));
    controller
        .acquire::<ScaleTo>()
        .bind(
            &node,
            0.5,
            TweenContext::scales(Vec3::ONE, Vec3::splat(3.0)).with_influence(Vec3::X),
        )
        .on_complete(log.callback("scale"));
    controller
        .acquire::<MaterialFloat>()
        .bind(
            &portrait,
            0.2,
            TweenContext::values(0.0, 0.75).with_key("dissolve"),
        )
        .on_complete(log.callback("material"));
    controller
        .acquire::<LineAlpha>()
        .bind(&path, 0.1, TweenContext::values(1.0, 0.0))
        .on_complete(log.callback("line"));

    assert_eq!(controller.active_count(), 5);
    run_until_idle(&mut controller, FRAME, 120);

    assert_eq!(panel.borrow().alpha, 1.0);
    assert_eq!(icon.borrow().color, clear);
    assert_eq!(node.borrow().local_scale, Vec3::new(3.0, 1.0, 1.0));
    assert_eq!(portrait.borrow().material.get_float("dissolve"), Some(0.75));
    assert!(path.borrow().gradient.alpha_keys.iter().all(|k| k.alpha == 0.0));

    let mut calls = log.calls();
    calls.sort();
    assert_eq!(calls, vec!["alpha", "color", "line", "material", "scale"]);
    assert_eq!(controller.reserve_count(), 5);
}

/// Test: Binding applies the base value before any tick
#[test]
fn test_bind_applies_base_value_immediately() {
    let mut controller = TweenController::new();
    let panel = Target::new(CanvasGroup { alpha: 0.9 });

    controller
        .acquire::<AlphaFade>()
        .bind(&panel, 1.0, TweenContext::values(0.2, 1.0));

    assert_eq!(panel.borrow().alpha, 0.2);
}

/// Test: Two targets with different durations
/// Given tweens of 1.0s on A and 2.0s on B
/// When ticking by 1.0 twice
/// Then A completes on the first tick and B on the second
#[test]
fn test_two_targets_complete_in_order() {
    let mut controller = TweenController::new();
    let log = CallLog::new();
    let a = Target::new(CanvasGroup::default());
    let b = Target::new(CanvasGroup::default());

    controller
        .acquire::<AlphaFade>()
        .bind(&a, 1.0, TweenContext::values(0.0, 1.0))
        .on_complete(log.callback("a"));
    controller
        .acquire::<AlphaFade>()
        .bind(&b, 2.0, TweenContext::values(0.0, 1.0))
        .on_complete(log.callback("b"));

    controller.tick(1.0);
    assert_eq!(log.calls(), vec!["a"]);
    assert_eq!(a.borrow().alpha, 1.0);
    assert_eq!(b.borrow().alpha, 0.5);

    controller.tick(1.0);
    assert_eq!(log.calls(), vec!["a", "b"]);
    assert_eq!(b.borrow().alpha, 1.0);
}

/// Test: Progress is monotonic across frames and never overshoots
#[test]
fn test_progress_is_monotonic_at_60fps() {
    let mut controller = TweenController::new();
    let panel = Target::new(CanvasGroup::default());
    controller
        .acquire::<AlphaFade>()
        .bind(&panel, 1.0, TweenContext::values(0.0, 1.0));

    let mut last = panel.borrow().alpha;
    let mut frames = 0;
    while !controller.is_idle() {
        controller.tick(FRAME);
        frames += 1;
        let alpha = panel.borrow().alpha;
        assert!(alpha >= last, "alpha went backwards: {} -> {}", last, alpha);
        assert!(alpha <= 1.0);
        last = alpha;
        assert!(frames <= 61, "fade did not finish in one second of frames");
    }
    assert!(frames >= 60);
    assert_eq!(last, 1.0);
}

/// Test: A zero-length tween finishes on the first tick
#[test]
fn test_zero_duration_completes_on_first_tick() {
    let mut controller = TweenController::new();
    let log = CallLog::new();
    let panel = Target::new(CanvasGroup::default());

    controller
        .acquire::<AlphaFade>()
        .bind(&panel, 0.0, TweenContext::values(1.0, 0.0))
        .on_complete(log.callback("instant"));
    controller.tick(0.0);

    assert_eq!(panel.borrow().alpha, 0.0);
    assert_eq!(log.count("instant"), 1);
}

/// Test: Delayed triggers work as timers
#[test]
fn test_delayed_trigger_fires_after_duration() {
    let mut controller = TweenController::new();
    let log = CallLog::new();
    let anchor = Target::new(tween::library::Behaviour::named("hud"));

    controller
        .acquire::<DelayedTrigger>()
        .bind(&anchor, 0.5, TweenContext::default())
        .on_complete(log.callback("show"));

    run_frames(&mut controller, 4, 0.1);
    assert!(log.calls().is_empty());

    run_frames(&mut controller, 2, 0.1);
    assert_eq!(log.calls(), vec!["show"]);
}

/// A host-side type animated through the bundled kinds.
struct Label {
    opacity: f32,
}

impl Fade for Label {
    fn set_alpha(&mut self, alpha: f32) {
        self.opacity = alpha;
    }
}

/// Test: Kinds are generic over host types implementing the capability
#[test]
fn test_host_type_driven_by_bundled_kind() {
    let mut controller = TweenController::new();
    let label = Target::new(Label { opacity: 1.0 });

    let tween = controller.acquire::<AlphaFade<Label>>();
    tween.bind(&label, 0.5, TweenContext::values(1.0, 0.0));
    assert_eq!(tween.state(), TweenState::Bound);

    controller.tick(0.25);
    assert_close(label.borrow().opacity, 0.5);
    controller.tick(0.25);
    assert_eq!(label.borrow().opacity, 0.0);
}
