//! Presentation layer view models
//!
//! Pure read-only projections of the session for rendering: the hint
//! panels, the visible countdown, the answer form, and the reveal card.
//! Nothing here mutates state or talks to the channel; user actions flow
//! back as [`crate::session::Intent`] values instead.

use itertools::Itertools;
use serde::Serialize;

use crate::{
    panels::HintPanels,
    session::{Phase, Session},
    timer::TimerKind,
};

/// Placeholder text shown in a hint slot that has not been revealed yet
const PLACEHOLDER: &str = "Loading...";
/// Shown on the reveal card when the player submitted nothing
const NO_ANSWER: &str = "No answer provided";

/// One hint slot ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    /// Hint text, or the placeholder while the slot is pending
    pub content: String,
    /// Whether the slot should be shown
    pub visible: bool,
}

/// Snapshot of everything the quiz screen renders, keyed by phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SessionView {
    /// Hints for the current question have not started arriving
    Loading {
        /// Current question number, 1-based
        question_number: u32,
        /// Latest total score
        score: u64,
        /// Hint slots, all placeholder
        panels: Vec<PanelView>,
    },
    /// The answer window is open and input is enabled
    Answering {
        /// Current question number, 1-based
        question_number: u32,
        /// Latest total score
        score: u64,
        /// Hint slots in arrival order
        panels: Vec<PanelView>,
        /// Seconds left on the answer window
        seconds_left: u32,
        /// The player's answer text so far
        answer: String,
    },
    /// The correct answer is shown before advancing
    Revealed {
        /// Current question number, 1-based
        question_number: u32,
        /// Latest total score
        score: u64,
        /// All hint slots for the question
        panels: Vec<PanelView>,
        /// What the player submitted, or a placeholder when empty
        submitted_answer: String,
        /// The correct answer reported by the server
        correct_answer: String,
        /// Seconds until the session advances
        seconds_to_next: u32,
    },
    /// Every question has been played
    Complete {
        /// Final score of the run
        score: u64,
    },
}

impl SessionView {
    /// Projects the current session state into a renderable snapshot
    pub fn of(session: &Session) -> Self {
        match session.phase() {
            Phase::Loading => Self::Loading {
                question_number: session.question_number(),
                score: session.score(),
                panels: panel_views(session.panels()),
            },
            Phase::AwaitingAnswer => Self::Answering {
                question_number: session.question_number(),
                score: session.score(),
                panels: panel_views(session.panels()),
                seconds_left: session.remaining(TimerKind::AnswerWindow),
                answer: session.answer().to_owned(),
            },
            Phase::Revealed => Self::Revealed {
                question_number: session.question_number(),
                score: session.score(),
                panels: panel_views(session.panels()),
                submitted_answer: if session.answer().is_empty() {
                    NO_ANSWER.to_owned()
                } else {
                    session.answer().to_owned()
                },
                correct_answer: session
                    .correct_answer()
                    .unwrap_or(crate::constants::session::UNKNOWN_ANSWER)
                    .to_owned(),
                seconds_to_next: session.remaining(TimerKind::PostReveal),
            },
            Phase::Complete => Self::Complete {
                score: session.score(),
            },
        }
    }
}

/// Maps the hint slots into renderable panels, substituting the placeholder
fn panel_views(panels: &HintPanels) -> Vec<PanelView> {
    panels
        .slots()
        .iter()
        .map(|slot| PanelView {
            content: slot.content().unwrap_or(PLACEHOLDER).to_owned(),
            visible: slot.is_visible(),
        })
        .collect_vec()
}
