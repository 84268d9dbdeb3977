//! Structured file logging for the tween scheduler and its demo host.
//!
//! Log levels:
//! - ERROR: Failures that abort a scenario run
//! - WARN: Misuse that was recovered from (negative durations or deltas)
//! - INFO: Host lifecycle (startup, scenario loaded, run finished)
//! - DEBUG: Controller operations (acquire, cancel, recycle)
//! - TRACE: Per-tick detail (every completion and pool transfer)
//!
//! Nothing is written until [`init_with_debug`] has been called, so library
//! users and tests never touch the filesystem. Debug mode can be enabled
//! with the `--debug` flag or `TWEEN_DEBUG=1`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Log levels for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Whether `TWEEN_DEBUG` asks for debug output.
fn env_debug(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Start logging to `~/.tween/tween.log`, truncating any previous run.
///
/// Debug level is enabled by `debug` or `TWEEN_DEBUG`; otherwise INFO.
pub fn init_with_debug(debug: bool) {
    let env = std::env::var("TWEEN_DEBUG").ok();
    let level = if debug || env_debug(env.as_deref()) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);

    if let Some(tween_dir) = dirs::home_dir().map(|h| h.join(".tween")) {
        let _ = std::fs::create_dir_all(&tween_dir);
        let path = tween_dir.join("tween.log");
        let _ = std::fs::write(&path, "");
        LOG_PATH.set(path).ok();
    }
}

/// Get the current log level.
pub fn get_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Whether a message at `level` would be written.
///
/// The controller checks this before formatting per-tick messages.
pub fn enabled(level: LogLevel) -> bool {
    LOG_PATH.get().is_some() && level <= get_level()
}

/// Log a message at the specified level.
pub fn log_at(level: LogLevel, msg: &str) {
    if level > get_level() {
        return;
    }

    if let Some(path) = LOG_PATH.get() {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{}] {}", timestamp, level.as_str(), msg);
        }
    }
}

/// Log a message at INFO level.
pub fn log(msg: &str) {
    log_at(LogLevel::Info, msg);
}

pub fn error(msg: &str) {
    log_at(LogLevel::Error, msg);
}

pub fn warn(msg: &str) {
    log_at(LogLevel::Warn, msg);
}

pub fn debug(msg: &str) {
    log_at(LogLevel::Debug, msg);
}

pub fn trace(msg: &str) {
    log_at(LogLevel::Trace, msg);
}

/// Log macro for INFO level.
#[macro_export]
macro_rules! tlog {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

/// Log macro for ERROR level.
#[macro_export]
macro_rules! tlog_error {
    ($($arg:tt)*) => {
        $crate::log::error(&format!($($arg)*))
    };
}

/// Log macro for WARN level.
#[macro_export]
macro_rules! tlog_warn {
    ($($arg:tt)*) => {
        $crate::log::warn(&format!($($arg)*))
    };
}

/// Log macro for DEBUG level (only logs when debug mode is enabled).
#[macro_export]
macro_rules! tlog_debug {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Debug) {
            $crate::log::debug(&format!($($arg)*))
        }
    };
}

/// Log macro for TRACE level. Skips formatting entirely when filtered out,
/// since it is called from inside the tick loop.
#[macro_export]
macro_rules! tlog_trace {
    ($($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogLevel::Trace) {
            $crate::log::trace(&format!($($arg)*))
        }
    };
}
