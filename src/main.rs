use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use tween::config::Config;
use tween::scenario::{Runner, Scenario};
use tween::{tlog, tlog_error, Result};

/// Tween - replay scripted tween timelines through the pooled controller
#[derive(Parser, Debug)]
#[command(name = "tween")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    TWEEN_DEBUG=1   Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.tween/tween.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a scenario file and print the state after every frame
    Run {
        /// Path to the scenario TOML file
        scenario: PathBuf,

        /// Frame rate (overrides the config file, not the scenario)
        #[arg(long)]
        fps: Option<f32>,

        /// Sleep between frames so the run takes wall-clock time
        #[arg(long)]
        realtime: bool,

        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tween::log::init_with_debug(cli.debug);

    let result = match cli.command {
        Command::Run {
            scenario,
            fps,
            realtime,
            json,
        } => run_scenario(scenario, fps, realtime, json),
        Command::Config => show_config(),
    };
    if let Err(e) = &result {
        tlog_error!("Command failed: {}", e);
    }
    result
}

/// Load a scenario and replay it frame by frame.
fn run_scenario(path: PathBuf, fps: Option<f32>, realtime: bool, json: bool) -> Result<()> {
    tlog!(
        "Run command: scenario={}, fps={:?}, realtime={}, json={}",
        path.display(),
        fps,
        realtime,
        json
    );

    let mut config = Config::load()?;
    if let Some(fps) = fps {
        config.fps = fps;
        config.validate()?;
    }

    let scenario = Scenario::load(&path)?;
    let mut runner = Runner::new(scenario, &config.controller, config.fps)?;
    let frame_duration = Duration::from_secs_f32(runner.delta());

    if !json {
        println!("Scenario: {}", display_name(runner.name(), &path));
        println!("Frame:    {:.2}ms", runner.delta() * 1000.0);
        println!();
    }

    let mut frames = 0u64;
    while !runner.is_finished() {
        let frame_start = Instant::now();
        let frame = runner.step()?;
        if json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("{}", frame);
        }
        frames += 1;

        if realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
    }

    if !json {
        let stats = runner.controller().stats();
        println!();
        println!("Finished after {} frame(s)", frames);
        println!(
            "  created={} reused={} completed={} cancelled={} dropped={}",
            stats.created, stats.reused, stats.completed, stats.cancelled, stats.dropped
        );
    }
    Ok(())
}

fn display_name(name: &str, path: &Path) -> String {
    if name.is_empty() {
        path.display().to_string()
    } else {
        name.to_string()
    }
}

/// Print the config file location and its effective contents.
fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;
    let source = if path.exists() { "file" } else { "defaults" };
    println!("# {} ({})", path.display(), source);
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
