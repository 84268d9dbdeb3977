//! Requests from other threads, applied by the tick thread.
//!
//! Tweens and their targets never leave the tick thread. Other threads hold a
//! [`CommandSender`] and refer to targets by [`TargetId`]; the controller
//! drains pending commands at the start of every tick.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::core::TargetId;

/// A deferred controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Cancel every active tween bound to a target.
    CancelTarget {
        /// Identity of the target.
        target: TargetId,
        /// Whether completion callbacks run.
        invoke_callback: bool,
    },
    /// Cancel every active tween.
    CancelAll {
        /// Whether completion callbacks run.
        invoke_callback: bool,
    },
}

/// Cloneable, `Send` handle for queueing [`Command`]s.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue cancellation of every tween bound to `target`.
    ///
    /// Applied at the start of the next tick. Target ids are never reused, so
    /// if the target is dropped before then the command matches nothing.
    /// Returns `false` if the controller has been dropped.
    pub fn cancel_target(&self, target: TargetId, invoke_callback: bool) -> bool {
        self.send(Command::CancelTarget {
            target,
            invoke_callback,
        })
    }

    /// Queue cancellation of every active tween.
    pub fn cancel_all(&self, invoke_callback: bool) -> bool {
        self.send(Command::CancelAll { invoke_callback })
    }

    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Receiving half owned by the controller.
pub(crate) struct CommandQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every command queued so far, in send order.
    pub(crate) fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(command) => commands.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        commands
    }
}
