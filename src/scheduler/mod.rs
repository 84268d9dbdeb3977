//! Frame-driven scheduling of pooled tweens.
//!
//! [`TweenController`] is the entry point. [`Reserve`] is its per-kind pool
//! and [`CommandSender`] lets other threads queue cancellations.

mod command;
mod controller;
mod pool;

pub use command::{Command, CommandSender};
pub use controller::{ControllerConfig, ControllerStats, TweenController};
pub use pool::Reserve;
