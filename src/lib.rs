pub mod config;
pub mod core;
pub mod error;
pub mod library;
pub mod log;
pub mod scenario;
pub mod scheduler;

pub use crate::core::{Target, TargetId, Tween, TweenContext, TweenId, TweenState};
pub use error::{Error, Result};
pub use scheduler::{CommandSender, ControllerConfig, TweenController};
