//! Single-purpose countdown timers
//!
//! The session owns two independent countdowns: the answer window and the
//! post-reveal pause. A countdown is a plain decrementing clock; the session
//! decides when ticks are delivered and what an expiry means. Expiry fires
//! exactly once per `start`: the countdown stops itself when it reaches zero
//! and stays inert until restarted.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Identifies which of the session's two countdowns a tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum TimerKind {
    /// The 30-second window in which the player may answer
    AnswerWindow,
    /// The 3-second pause between answer reveal and advance
    PostReveal,
}

/// Outcome of delivering one tick to a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; nothing happened
    Idle,
    /// The countdown decremented and is still running
    Running(u32),
    /// The countdown reached zero and stopped; fire the expiry effect
    Expired,
}

/// A decrementing clock with start, tick, and exactly-once expiry semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Seconds left before expiry
    remaining: u32,
    /// Whether ticks currently decrement this countdown
    running: bool,
}

impl Countdown {
    /// Resets the countdown to `ceiling` and starts it
    pub fn start(&mut self, ceiling: u32) {
        self.remaining = ceiling;
        self.running = true;
    }

    /// Resets the countdown to `ceiling` without starting it
    ///
    /// Used when advancing to a new question: the answer window is preset
    /// to its full ceiling but does not decrement until the first hint of
    /// the question arrives.
    pub fn reset(&mut self, ceiling: u32) {
        self.remaining = ceiling;
        self.running = false;
    }

    /// Halts the countdown without firing its expiry
    ///
    /// Stopping a countdown that is not running is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Delivers one tick, decrementing the countdown by one second
    ///
    /// Returns [`TickOutcome::Expired`] at most once per `start`; once
    /// expired the countdown reports [`TickOutcome::Idle`] until restarted.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    /// Seconds left before expiry
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether ticks currently decrement this countdown
    pub fn is_running(&self) -> bool {
        self.running
    }
}
