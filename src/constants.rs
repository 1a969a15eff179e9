//! Configuration constants for the trivia session
//!
//! This module contains the fixed ceilings and sentinels used throughout
//! the session controller, providing consistent boundaries for the
//! different components.

/// Session-level configuration constants
pub mod session {
    /// Number of questions played when the host does not supply a count
    pub const DEFAULT_MAX_QUESTIONS: u32 = 10;
    /// Maximum number of questions allowed in a single session
    pub const MAX_QUESTIONS_LIMIT: u32 = 100;
    /// Displayed correct answer when the server omits or blanks the field
    pub const UNKNOWN_ANSWER: &str = "Unknown";
}

/// Countdown timer configuration constants
pub mod timer {
    /// Ceiling in seconds of the answer window for each question
    pub const ANSWER_WINDOW_SECONDS: u32 = 30;
    /// Ceiling in seconds of the pause between reveal and advance
    pub const POST_REVEAL_SECONDS: u32 = 3;
    /// Real-time interval between consecutive timer ticks
    pub const TICK_INTERVAL: web_time::Duration = web_time::Duration::from_secs(1);
}

/// Hint panel configuration constants
pub mod panels {
    /// Fixed number of hint panel slots per question
    pub const SLOT_COUNT: usize = 3;
}

/// Category weight map configuration constants
pub mod weights {
    /// Maximum total question count across all selected categories
    pub const MAX_TOTAL_QUESTIONS: u32 = 10;
}
