//! Scenario tests: files on disk replayed through the runner with config
//! loaded the way the CLI does it.

use tween::config::Config;
use tween::scenario::{Frame, Model, Runner, Scenario};
use tween::{ControllerConfig, Error};

use crate::fixtures::{assert_close, ScenarioFile};

const MENU: &str = r#"
name = "menu transition"
fps = 10.0

[targets.backdrop]
model = "canvas_group"
alpha = 1.0

[targets.title]
model = "image"

[targets.outline]
model = "line_renderer"

[targets.timer]
model = "behaviour"
name = "auto-advance"

[[tweens]]
target = "backdrop"
kind = "alpha"
duration = 0.4
context = { base_value = 1.0, target_value = 0.0 }

[[tweens]]
target = "title"
kind = "material"
start = 0.2
duration = 0.2
label = "dissolve-in"
context = { key = "dissolve", base_value = 1.0, target_value = 0.0 }

[[tweens]]
target = "outline"
kind = "line_alpha"
duration = 1.0
context = { base_value = 0.0, target_value = 1.0 }

[[tweens]]
target = "timer"
kind = "delayed_trigger"
duration = 0.3

[[cancels]]
target = "outline"
at = 0.5
invoke_callback = false
"#;

fn completed_at(frames: &[Frame], label: &str) -> Option<u64> {
    frames
        .iter()
        .find(|f| f.completed.iter().any(|l| l == label))
        .map(|f| f.index)
}

/// Test: Full scenario from disk
/// Given a menu transition with a fade, a late material tween, a cancelled
/// line fade and a timer
/// When it is replayed at 10 fps
/// Then each tween finishes on its frame and the cancelled one stays silent
#[test]
fn test_menu_transition_from_file() {
    let file = ScenarioFile::new(MENU);
    let scenario = Scenario::load(&file.path).unwrap();
    assert_eq!(scenario.targets.len(), 4);

    let mut runner = Runner::new(scenario, &ControllerConfig::default(), 60.0).unwrap();
    assert_close(runner.delta(), 0.1);
    let frames = runner.run().unwrap();

    assert_eq!(completed_at(&frames, "delayed_trigger:timer"), Some(2));
    assert_eq!(completed_at(&frames, "alpha:backdrop"), Some(3));
    assert_eq!(completed_at(&frames, "dissolve-in"), Some(3));
    assert_eq!(completed_at(&frames, "line_alpha:outline"), None);
    assert_eq!(frames.len(), 6);

    assert_eq!(
        runner.target("backdrop"),
        Some(Model::CanvasGroup(tween::library::CanvasGroup { alpha: 0.0 }))
    );
    match runner.target("title") {
        Some(Model::Image(image)) => assert_eq!(image.material.get_float("dissolve"), Some(0.0)),
        other => panic!("unexpected title state {:?}", other),
    }
    match runner.target("outline") {
        Some(Model::LineRenderer(line)) => {
            for key in &line.gradient.alpha_keys {
                assert_close(key.alpha, 0.5);
            }
        }
        other => panic!("unexpected outline state {:?}", other),
    }

    let stats = runner.controller().stats();
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(runner.controller().reserve_count(), 4);
}

/// Test: Frames serialize as JSON lines
#[test]
fn test_frames_as_json_lines() {
    let mut runner = Runner::new(
        Scenario::from_toml(MENU).unwrap(),
        &ControllerConfig::default(),
        60.0,
    )
    .unwrap();
    let frames = runner.run().unwrap();

    for frame in &frames {
        let line = serde_json::to_string(frame).unwrap();
        assert!(!line.contains('\n'));
        let parsed: Frame = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.index, frame.index);
        assert_eq!(parsed.targets.len(), 4);
    }
}

/// Test: Config file drives the frame rate and pool settings
#[test]
fn test_config_from_file_sets_frame_rate() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tween.toml");
    std::fs::write(&path, "fps = 20.0\n\n[controller]\nmax_reserve_per_kind = 1\n").unwrap();
    let config = Config::load_from(&path).unwrap();

    let source = MENU.replace("fps = 10.0\n", "");
    let mut runner = Runner::new(
        Scenario::from_toml(&source).unwrap(),
        &config.controller,
        config.fps,
    )
    .unwrap();
    assert_close(runner.delta(), 0.05);

    runner.run().unwrap();
    assert_eq!(runner.controller().reserve_count(), 4);
    assert_eq!(runner.controller().stats().dropped, 0);
}

/// Test: Broken scenarios are reported, not run
#[test]
fn test_scenario_errors() {
    let missing = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        Scenario::load(&missing.path().join("nope.toml")),
        Err(Error::Io(_))
    ));

    let file = ScenarioFile::new("[[tweens]\ntarget = ");
    assert!(matches!(Scenario::load(&file.path), Err(Error::TomlParse(_))));

    let file = ScenarioFile::new(&MENU.replace("kind = \"material\"", "kind = \"color\""));
    assert!(matches!(
        Scenario::load(&file.path),
        Err(Error::KindMismatch { .. })
    ));

    let file = ScenarioFile::new(&MENU.replace("target = \"outline\"\nat", "target = \"gone\"\nat"));
    assert!(matches!(
        Scenario::load(&file.path),
        Err(Error::UnknownTarget(name)) if name == "gone"
    ));
}
