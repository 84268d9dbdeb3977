//! Scripted tween timelines.
//!
//! A scenario is a TOML file naming a set of targets, the tweens to start on
//! them and cancellations to issue, each at a time in seconds. [`Runner`]
//! replays it against a [`TweenController`] at a fixed frame rate and reports
//! the state of every target after each frame.
//!
//! ```toml
//! name = "panel intro"
//!
//! [targets.panel]
//! model = "canvas_group"
//! alpha = 0.0
//!
//! [[tweens]]
//! target = "panel"
//! kind = "alpha"
//! duration = 0.5
//! context = { base_value = 0.0, target_value = 1.0 }
//!
//! [[cancels]]
//! target = "panel"
//! at = 0.25
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{Interpolation, Target, TargetId, TweenContext};
use crate::library::{
    AlphaFade, Behaviour, CanvasGroup, ColorBlend, DelayedTrigger, Graphic, Image, LineAlpha,
    LineRenderer, MaterialFloat, ScaleTo, Transform,
};
use crate::scheduler::{ControllerConfig, TweenController};
use crate::{tlog, tlog_debug, Error, Result};

/// Slack when comparing scheduled times against accumulated frame time.
const TIME_EPSILON: f32 = 1e-4;

/// Initial value of a named target, tagged by `model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Model {
    CanvasGroup(CanvasGroup),
    Graphic(Graphic),
    Transform(Transform),
    Image(Image),
    LineRenderer(LineRenderer),
    Behaviour(Behaviour),
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::CanvasGroup(_) => "canvas_group",
            Model::Graphic(_) => "graphic",
            Model::Transform(_) => "transform",
            Model::Image(_) => "image",
            Model::LineRenderer(_) => "line_renderer",
            Model::Behaviour(_) => "behaviour",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::CanvasGroup(group) => write!(f, "alpha={:.3}", group.alpha),
            Model::Graphic(graphic) => {
                let c = graphic.color;
                write!(
                    f,
                    "rgba=({:.3}, {:.3}, {:.3}, {:.3})",
                    c.red, c.green, c.blue, c.alpha
                )
            }
            Model::Transform(transform) => {
                let s = transform.local_scale;
                write!(f, "scale=({:.3}, {:.3}, {:.3})", s.x, s.y, s.z)
            }
            Model::Image(image) => {
                let floats: Vec<String> = image
                    .material
                    .floats
                    .iter()
                    .map(|(key, value)| format!("{}={:.3}", key, value))
                    .collect();
                write!(f, "material=[{}]", floats.join(", "))
            }
            Model::LineRenderer(line) => {
                let alphas: Vec<String> = line
                    .gradient
                    .alpha_keys
                    .iter()
                    .map(|key| format!("{:.3}", key.alpha))
                    .collect();
                write!(f, "alpha_keys=[{}]", alphas.join(", "))
            }
            Model::Behaviour(behaviour) => write!(f, "behaviour={:?}", behaviour.name),
        }
    }
}

/// Tween kinds a scenario can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenKind {
    Alpha,
    Color,
    Scale,
    Material,
    LineAlpha,
    DelayedTrigger,
}

impl TweenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweenKind::Alpha => AlphaFade::<CanvasGroup>::NAME,
            TweenKind::Color => ColorBlend::<Graphic>::NAME,
            TweenKind::Scale => ScaleTo::<Transform>::NAME,
            TweenKind::Material => MaterialFloat::<Image>::NAME,
            TweenKind::LineAlpha => LineAlpha::<LineRenderer>::NAME,
            TweenKind::DelayedTrigger => DelayedTrigger::<Behaviour>::NAME,
        }
    }

    /// Whether this kind can be bound to a target of `model`.
    pub fn drives(&self, model: &Model) -> bool {
        matches!(
            (self, model),
            (TweenKind::Alpha, Model::CanvasGroup(_))
                | (TweenKind::Color, Model::Graphic(_))
                | (TweenKind::Scale, Model::Transform(_))
                | (TweenKind::Material, Model::Image(_))
                | (TweenKind::LineAlpha, Model::LineRenderer(_))
                | (TweenKind::DelayedTrigger, _)
        )
    }
}

/// A tween started at `start` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenEntry {
    pub target: String,
    pub kind: TweenKind,
    #[serde(default)]
    pub start: f32,
    pub duration: f32,
    /// Reported when the tween's callback runs. Defaults to `kind:target`.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub context: TweenContext,
}

impl TweenEntry {
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{}:{}", self.kind.as_str(), self.target))
    }
}

/// Cancellation of every tween on `target` at `at` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelEntry {
    pub target: String,
    pub at: f32,
    #[serde(default = "default_invoke_callback")]
    pub invoke_callback: bool,
}

fn default_invoke_callback() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    /// Frame rate override; the config value is used when absent.
    pub fps: Option<f32>,
    /// Fixed run length in seconds. Without it the run ends once every
    /// scheduled event has fired and no tween is active.
    pub length: Option<f32>,
    pub targets: BTreeMap<String, Model>,
    pub tweens: Vec<TweenEntry>,
    pub cancels: Vec<CancelEntry>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        tlog_debug!("Scenario::load path={}", path.display());
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every reference and time in the scenario.
    pub fn validate(&self) -> Result<()> {
        if let Some(fps) = self.fps {
            ensure_frame_rate(fps)?;
        }
        if let Some(length) = self.length {
            ensure_positive("length", length)?;
        }
        for tween in &self.tweens {
            let model = self
                .targets
                .get(&tween.target)
                .ok_or_else(|| Error::UnknownTarget(tween.target.clone()))?;
            if !tween.kind.drives(model) {
                return Err(Error::KindMismatch {
                    target: format!("{} ({})", tween.target, model.as_str()),
                    kind: tween.kind.as_str().to_string(),
                });
            }
            ensure_non_negative("start", tween.start)?;
            ensure_non_negative("duration", tween.duration)?;
        }
        for cancel in &self.cancels {
            if !self.targets.contains_key(&cancel.target) {
                return Err(Error::UnknownTarget(cancel.target.clone()));
            }
            ensure_non_negative("at", cancel.at)?;
        }
        Ok(())
    }
}

fn ensure_positive(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// A positive rate whose frame delta is representable.
fn ensure_frame_rate(fps: f32) -> Result<()> {
    ensure_positive("fps", fps)?;
    if !(1.0 / fps).is_finite() {
        return Err(Error::Validation(format!(
            "fps {} is too small for a finite frame delta",
            fps
        )));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// A scenario target as seen by the controller.
enum Live {
    CanvasGroup(Target<CanvasGroup>),
    Graphic(Target<Graphic>),
    Transform(Target<Transform>),
    Image(Target<Image>),
    LineRenderer(Target<LineRenderer>),
    Behaviour(Target<Behaviour>),
}

impl Live {
    fn new(model: &Model) -> Self {
        match model.clone() {
            Model::CanvasGroup(m) => Live::CanvasGroup(Target::new(m)),
            Model::Graphic(m) => Live::Graphic(Target::new(m)),
            Model::Transform(m) => Live::Transform(Target::new(m)),
            Model::Image(m) => Live::Image(Target::new(m)),
            Model::LineRenderer(m) => Live::LineRenderer(Target::new(m)),
            Model::Behaviour(m) => Live::Behaviour(Target::new(m)),
        }
    }

    fn id(&self) -> TargetId {
        match self {
            Live::CanvasGroup(t) => t.id(),
            Live::Graphic(t) => t.id(),
            Live::Transform(t) => t.id(),
            Live::Image(t) => t.id(),
            Live::LineRenderer(t) => t.id(),
            Live::Behaviour(t) => t.id(),
        }
    }

    fn snapshot(&self) -> Model {
        match self {
            Live::CanvasGroup(t) => Model::CanvasGroup(t.borrow().clone()),
            Live::Graphic(t) => Model::Graphic(t.borrow().clone()),
            Live::Transform(t) => Model::Transform(t.borrow().clone()),
            Live::Image(t) => Model::Image(t.borrow().clone()),
            Live::LineRenderer(t) => Model::LineRenderer(t.borrow().clone()),
            Live::Behaviour(t) => Model::Behaviour(t.borrow().clone()),
        }
    }

    fn start<F>(
        &self,
        controller: &mut TweenController,
        entry: &TweenEntry,
        done: F,
    ) -> Result<()>
    where
        F: FnOnce() + 'static,
    {
        match (entry.kind, self) {
            (TweenKind::Alpha, Live::CanvasGroup(t)) => {
                start::<AlphaFade>(controller, t, entry, done)
            }
            (TweenKind::Color, Live::Graphic(t)) => {
                start::<ColorBlend>(controller, t, entry, done)
            }
            (TweenKind::Scale, Live::Transform(t)) => {
                start::<ScaleTo>(controller, t, entry, done)
            }
            (TweenKind::Material, Live::Image(t)) => {
                start::<MaterialFloat>(controller, t, entry, done)
            }
            (TweenKind::LineAlpha, Live::LineRenderer(t)) => {
                start::<LineAlpha>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::CanvasGroup(t)) => {
                start::<DelayedTrigger<CanvasGroup>>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::Graphic(t)) => {
                start::<DelayedTrigger<Graphic>>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::Transform(t)) => {
                start::<DelayedTrigger<Transform>>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::Image(t)) => {
                start::<DelayedTrigger<Image>>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::LineRenderer(t)) => {
                start::<DelayedTrigger<LineRenderer>>(controller, t, entry, done)
            }
            (TweenKind::DelayedTrigger, Live::Behaviour(t)) => {
                start::<DelayedTrigger<Behaviour>>(controller, t, entry, done)
            }
            (kind, live) => Err(Error::KindMismatch {
                target: format!("{} ({})", entry.target, live.snapshot().as_str()),
                kind: kind.as_str().to_string(),
            }),
        }
    }
}

fn start<K: Interpolation>(
    controller: &mut TweenController,
    target: &Target<K::Target>,
    entry: &TweenEntry,
    done: impl FnOnce() + 'static,
) -> Result<()> {
    controller
        .acquire::<K>()
        .bind(target, entry.duration, entry.context.clone())
        .on_complete(done);
    Ok(())
}

/// State after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u64,
    /// Scenario time at the end of the frame, in seconds.
    pub time: f32,
    pub active: usize,
    /// Labels of tweens whose callback ran during the frame.
    pub completed: Vec<String>,
    pub targets: BTreeMap<String, Model>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {:>4}  t={:.3}s  active={}",
            self.index, self.time, self.active
        )?;
        for (name, model) in &self.targets {
            write!(f, "\n  {:<16} {}", name, model)?;
        }
        for label in &self.completed {
            write!(f, "\n  completed: {}", label)?;
        }
        Ok(())
    }
}

/// Replays a [`Scenario`] one frame at a time.
pub struct Runner {
    name: String,
    controller: TweenController,
    targets: BTreeMap<String, Live>,
    /// Tweens ordered by start time.
    tweens: Vec<TweenEntry>,
    next_tween: usize,
    /// Cancels ordered by time.
    cancels: Vec<CancelEntry>,
    next_cancel: usize,
    completed: Rc<RefCell<Vec<String>>>,
    length: Option<f32>,
    delta: f32,
    frame: u64,
}

impl Runner {
    /// Build the runner. The scenario's own `fps` wins over `fps`.
    pub fn new(scenario: Scenario, controller: &ControllerConfig, fps: f32) -> Result<Self> {
        scenario.validate()?;
        let fps = scenario.fps.unwrap_or(fps);
        ensure_frame_rate(fps)?;

        let targets = scenario
            .targets
            .iter()
            .map(|(name, model)| (name.clone(), Live::new(model)))
            .collect();

        let mut tweens = scenario.tweens;
        tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
        let mut cancels = scenario.cancels;
        cancels.sort_by(|a, b| a.at.total_cmp(&b.at));

        tlog!(
            "Scenario {:?}: {} target(s), {} tween(s), {} cancel(s) at {} fps",
            scenario.name,
            scenario.targets.len(),
            tweens.len(),
            cancels.len(),
            fps
        );

        Ok(Self {
            name: scenario.name,
            controller: TweenController::with_config(controller),
            targets,
            tweens,
            next_tween: 0,
            cancels,
            next_cancel: 0,
            completed: Rc::new(RefCell::new(Vec::new())),
            length: scenario.length,
            delta: 1.0 / fps,
            frame: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds per frame.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Scenario time at the start of the next frame.
    pub fn now(&self) -> f32 {
        self.frame as f32 * self.delta
    }

    pub fn controller(&self) -> &TweenController {
        &self.controller
    }

    /// Current state of a named target.
    pub fn target(&self, name: &str) -> Option<Model> {
        self.targets.get(name).map(Live::snapshot)
    }

    pub fn is_finished(&self) -> bool {
        match self.length {
            Some(length) => self.now() >= length - TIME_EPSILON,
            None => {
                self.next_tween == self.tweens.len()
                    && self.next_cancel == self.cancels.len()
                    && self.controller.is_idle()
            }
        }
    }

    /// Fire due cancels, start due tweens, then tick the controller once.
    pub fn step(&mut self) -> Result<Frame> {
        let now = self.now();

        while let Some(cancel) = self.cancels.get(self.next_cancel) {
            if cancel.at > now + TIME_EPSILON {
                break;
            }
            self.next_cancel += 1;
            if let Some(live) = self.targets.get(&cancel.target) {
                let stopped = self
                    .controller
                    .cancel_by_target(live.id(), cancel.invoke_callback);
                tlog_debug!(
                    "t={:.3}: cancel {} stopped {} tween(s)",
                    now,
                    cancel.target,
                    stopped
                );
            }
        }

        while let Some(entry) = self.tweens.get(self.next_tween) {
            if entry.start > now + TIME_EPSILON {
                break;
            }
            self.next_tween += 1;
            let live = self
                .targets
                .get(&entry.target)
                .ok_or_else(|| Error::UnknownTarget(entry.target.clone()))?;
            let log = Rc::clone(&self.completed);
            let label = entry.label();
            live.start(&mut self.controller, entry, move || {
                log.borrow_mut().push(label)
            })?;
            tlog_debug!("t={:.3}: started {}", now, entry.label());
        }

        self.controller.tick(self.delta);

        let frame = Frame {
            index: self.frame,
            time: (self.frame + 1) as f32 * self.delta,
            active: self.controller.active_count(),
            completed: self.completed.borrow_mut().drain(..).collect(),
            targets: self
                .targets
                .iter()
                .map(|(name, live)| (name.clone(), live.snapshot()))
                .collect(),
        };
        self.frame += 1;
        Ok(frame)
    }

    /// Step until [`is_finished`](Self::is_finished), collecting every frame.
    pub fn run(&mut self) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        while !self.is_finished() {
            frames.push(self.step()?);
        }
        tlog!(
            "Scenario {:?} finished after {} frame(s), stats={:?}",
            self.name,
            frames.len(),
            self.controller.stats()
        );
        Ok(frames)
    }
}
