//! Session state machine
//!
//! This module contains the orchestrator for a single player's quiz run: it
//! owns the current question identity, the score, the hint panels, and both
//! countdown timers, and it is the only place session state mutates. The
//! host feeds it one event at a time (inbound server messages, user intents,
//! tick alarms); each event is fully applied before the next one is looked
//! at, so no locking is ever needed.

use enum_map::EnumMap;
use garde::Validate;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::{
    Event,
    channel::{Channel, ClientMessage, ServerMessage},
    constants::{
        session::{DEFAULT_MAX_QUESTIONS, MAX_QUESTIONS_LIMIT, UNKNOWN_ANSWER},
        timer::{ANSWER_WINDOW_SECONDS, POST_REVEAL_SECONDS, TICK_INTERVAL},
    },
    panels::HintPanels,
    storage::SessionStore,
    timer::{Countdown, TickOutcome, TimerKind},
    weights::CategoryWeights,
};

/// The phase the session is currently in for the current question
///
/// Phases advance in a fixed cycle: `Loading` until the first hint arrives,
/// `AwaitingAnswer` while the answer window runs, `Revealed` after the
/// server scores a submission, then back to `Loading` for the next question
/// or `Complete` once every question has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first hint of the current question
    Loading,
    /// Hints are arriving, the answer window is running, input is enabled
    AwaitingAnswer,
    /// The correct answer is shown; the post-reveal pause is running
    Revealed,
    /// Every question has been played; the session is over
    Complete,
}

/// User actions emitted by the presentation layer
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The player edited the answer text field
    AnswerInput(String),
    /// The player submitted the answer form
    Submit,
    /// The player downvoted the just-revealed question
    Downvote,
}

/// Messages used for scheduled timer ticks
///
/// The session never sleeps; instead it hands these to the host through the
/// scheduling seam and reacts when they come back. A tick carries the
/// question number it was scheduled under so ticks that outlive their
/// question are dropped instead of firing into fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One-second tick for one of the session's countdowns
    Tick {
        /// Which countdown the tick belongs to
        timer: TimerKind,
        /// Question number the tick was scheduled under
        question: u32,
    },
}

/// Configuration options for the session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct SessionOptions {
    /// How many questions to play before the session completes
    #[garde(range(min = 1, max = MAX_QUESTIONS_LIMIT))]
    max_questions: u32,
}

impl SessionOptions {
    /// Creates options playing `max_questions` questions
    pub fn new(max_questions: u32) -> Self {
        Self { max_questions }
    }

    /// How many questions to play before the session completes
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }
}

impl Default for SessionOptions {
    /// Default session length is ten questions
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }
}

/// The state machine driving one player through a timed quiz run
///
/// All mutation happens inside this struct's event handlers; the
/// presentation layer observes it read-only through the accessors and
/// [`crate::view::SessionView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session configuration
    options: SessionOptions,
    /// Current question number, 1-based
    question_number: u32,
    /// Latest total score reported by the server
    score: u64,
    /// Hints observed for the current question
    hint_count: u32,
    /// The player's answer text for the current question
    answer: String,
    /// Current phase of the session
    phase: Phase,
    /// Correct answer text, present while the phase is `Revealed`
    correct_answer: Option<String>,
    /// Hint slots for the current question
    panels: HintPanels,
    /// The answer-window and post-reveal countdowns
    timers: EnumMap<TimerKind, Countdown>,
    /// Last-known category weight map, re-read from storage on advance
    weights: CategoryWeights,
    /// Teardown latch guaranteeing a single `end_game` send
    ended: bool,
}

impl Session {
    /// Creates a new session positioned at question 1
    ///
    /// The answer window is preset to its full ceiling but does not run
    /// until the first hint arrives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trivsolo::session::{Phase, Session, SessionOptions};
    ///
    /// let session = Session::new(SessionOptions::default());
    /// assert_eq!(session.question_number(), 1);
    /// assert_eq!(session.phase(), Phase::Loading);
    /// ```
    pub fn new(options: SessionOptions) -> Self {
        let mut timers: EnumMap<TimerKind, Countdown> = EnumMap::default();
        timers[TimerKind::AnswerWindow].reset(ANSWER_WINDOW_SECONDS);

        Self {
            options,
            question_number: 1,
            score: 0,
            hint_count: 0,
            answer: String::new(),
            phase: Phase::Loading,
            correct_answer: None,
            panels: HintPanels::default(),
            timers,
            weights: CategoryWeights::default(),
            ended: false,
        }
    }

    /// Starts the session once the channel is established
    ///
    /// Reads the category weight map from storage and requests the first
    /// question. No ticks are scheduled yet; the answer window starts when
    /// the first hint arrives.
    pub fn begin<C: Channel, St: SessionStore>(&mut self, store: &St, channel: &C) {
        if let Some(weights) = store.category_weights() {
            self.weights = weights;
        }
        channel.send(&ClientMessage::StartQuestion(self.weights.clone()));
    }

    /// Applies one event from the host's serialized queue
    ///
    /// This is the single entry point realizing the ordered event queue:
    /// server messages, user intents, and tick alarms all funnel through it
    /// one at a time.
    pub fn handle<C, St, S>(
        &mut self,
        event: Event,
        store: &mut St,
        channel: &C,
        schedule_alarm: S,
    ) where
        C: Channel,
        St: SessionStore,
        S: FnMut(AlarmMessage, Duration),
    {
        match event {
            Event::Server(message) => self.receive_message(message, store, schedule_alarm),
            Event::Alarm(alarm) => self.receive_alarm(alarm, store, channel, schedule_alarm),
            Event::Intent(intent) => self.apply_intent(intent, channel),
        }
    }

    /// Handles an inbound message from the server
    ///
    /// A `hint` exits `Loading` (starting the answer window) and fills the
    /// next panel; an `answer_result` replaces the score, reveals all
    /// panels, and starts the post-reveal pause; `game_status` and unknown
    /// messages only leave a diagnostic trace.
    pub fn receive_message<St, S>(
        &mut self,
        message: ServerMessage,
        store: &mut St,
        mut schedule_alarm: S,
    ) where
        St: SessionStore,
        S: FnMut(AlarmMessage, Duration),
    {
        if self.ended || matches!(self.phase, Phase::Complete) {
            return;
        }

        match message {
            ServerMessage::Hint { hint } => {
                if matches!(self.phase, Phase::Loading) {
                    self.phase = Phase::AwaitingAnswer;
                    self.timers[TimerKind::AnswerWindow].start(ANSWER_WINDOW_SECONDS);
                    self.schedule_tick(TimerKind::AnswerWindow, &mut schedule_alarm);
                }
                self.hint_count += 1;
                if !self.panels.reveal_next(&hint) {
                    tracing::warn!(
                        hint_count = self.hint_count,
                        "hint arrived with all panels already filled"
                    );
                }
            }
            ServerMessage::AnswerResult {
                correct,
                score,
                answer,
                hints,
            } => {
                tracing::debug!(correct, "answer result received");
                if let Some(score) = score {
                    self.score = score;
                    store.store_score(score);
                }
                self.panels.reveal_all(&hints);
                self.correct_answer = Some(
                    answer
                        .filter(|answer| !answer.is_empty())
                        .unwrap_or_else(|| UNKNOWN_ANSWER.to_owned()),
                );
                self.phase = Phase::Revealed;
                self.timers[TimerKind::AnswerWindow].stop();
                self.timers[TimerKind::PostReveal].start(POST_REVEAL_SECONDS);
                self.schedule_tick(TimerKind::PostReveal, &mut schedule_alarm);
            }
            ServerMessage::GameStatus { status } => {
                tracing::info!(%status, "game status");
            }
            ServerMessage::Unknown => {
                tracing::debug!("ignoring unrecognized server message");
            }
        }
    }

    /// Handles a scheduled timer tick
    ///
    /// Ticks scheduled under a previous question, or for a countdown that
    /// has since stopped, are dropped. A surviving tick decrements its
    /// countdown and reschedules itself; expiry of the answer window
    /// auto-submits the current (possibly empty) answer, and expiry of the
    /// post-reveal pause advances to the next question.
    pub fn receive_alarm<C, St, S>(
        &mut self,
        alarm: AlarmMessage,
        store: &St,
        channel: &C,
        mut schedule_alarm: S,
    ) where
        C: Channel,
        St: SessionStore,
        S: FnMut(AlarmMessage, Duration),
    {
        if self.ended || matches!(self.phase, Phase::Complete) {
            return;
        }

        let AlarmMessage::Tick { timer, question } = alarm;
        if question != self.question_number {
            return;
        }

        match self.timers[timer].tick() {
            TickOutcome::Idle => {}
            TickOutcome::Running(_) => self.schedule_tick(timer, &mut schedule_alarm),
            TickOutcome::Expired => match timer {
                TimerKind::AnswerWindow => {
                    // Phase is left untouched: the reveal waits for the
                    // server's answer_result.
                    if matches!(self.phase, Phase::AwaitingAnswer) {
                        self.send_answer(channel);
                    }
                }
                TimerKind::PostReveal => {
                    if matches!(self.phase, Phase::Revealed) {
                        self.advance(store, channel);
                    }
                }
            },
        }
    }

    /// Applies a user action emitted by the presentation layer
    pub fn apply_intent<C: Channel>(&mut self, intent: Intent, channel: &C) {
        if self.ended || matches!(self.phase, Phase::Complete) {
            return;
        }

        match intent {
            Intent::AnswerInput(text) => {
                if matches!(self.phase, Phase::AwaitingAnswer) {
                    self.answer = text;
                }
            }
            Intent::Submit => {
                if matches!(self.phase, Phase::AwaitingAnswer) {
                    self.send_answer(channel);
                }
            }
            Intent::Downvote => {
                if matches!(self.phase, Phase::Revealed) {
                    channel.send(&ClientMessage::DownvoteQuestion {});
                }
            }
        }
    }

    /// Ends the session, emitting a single best-effort `end_game`
    ///
    /// Safe to call from any phase and from any exit path; repeated calls
    /// are no-ops. Both countdowns stop, so any tick alarm still in flight
    /// lands on inert timers.
    pub fn end<C: Channel>(&mut self, channel: &C) {
        if self.ended {
            return;
        }
        self.ended = true;

        for timer in self.timers.values_mut() {
            timer.stop();
        }
        channel.send(&ClientMessage::EndGame {});
    }

    /// Resets per-question state and requests the next question
    ///
    /// When the next question number would exceed the configured count the
    /// session completes instead; the final score has already been written
    /// to shared storage for the results view.
    fn advance<C: Channel, St: SessionStore>(&mut self, store: &St, channel: &C) {
        self.answer.clear();
        self.hint_count = 0;
        self.correct_answer = None;
        self.panels.pending_reset();
        self.timers[TimerKind::PostReveal].stop();
        self.timers[TimerKind::AnswerWindow].reset(ANSWER_WINDOW_SECONDS);

        let next = self.question_number + 1;
        if next > self.options.max_questions {
            self.phase = Phase::Complete;
            tracing::info!(score = self.score, "session complete");
            return;
        }

        self.question_number = next;
        self.phase = Phase::Loading;
        if let Some(weights) = store.category_weights() {
            self.weights = weights;
        }
        channel.send(&ClientMessage::StartQuestion(self.weights.clone()));
    }

    /// Sends the current answer text and hint count to the server
    fn send_answer<C: Channel>(&self, channel: &C) {
        channel.send(&ClientMessage::SubmitAnswer {
            answer: self.answer.clone(),
            hint_count: self.hint_count,
        });
    }

    /// Asks the host to deliver the next tick for `timer` in one second
    fn schedule_tick<S: FnMut(AlarmMessage, Duration)>(
        &self,
        timer: TimerKind,
        schedule_alarm: &mut S,
    ) {
        schedule_alarm(
            AlarmMessage::Tick {
                timer,
                question: self.question_number,
            },
            TICK_INTERVAL,
        );
    }

    /// Current phase of the session
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current question number, 1-based
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    /// Latest total score reported by the server
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Hints observed for the current question
    pub fn hint_count(&self) -> u32 {
        self.hint_count
    }

    /// The player's current answer text
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The revealed correct answer, present while the phase is `Revealed`
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    /// The hint slots for the current question
    pub fn panels(&self) -> &HintPanels {
        &self.panels
    }

    /// Seconds left on the given countdown
    pub fn remaining(&self, timer: TimerKind) -> u32 {
        self.timers[timer].remaining()
    }

    /// Whether the given countdown is actively decrementing
    pub fn is_timer_running(&self, timer: TimerKind) -> bool {
        self.timers[timer].is_running()
    }
}
