//! # Trivsolo Session Library
//!
//! This library provides the client-side controller for a single-player
//! timed trivia session. It drives one player through a sequence of
//! questions delivered as progressive hints over a persistent connection,
//! reconciling countdown timers with asynchronous server events through a
//! single serialized event queue, and transitioning through answer
//! submission, reveal, and advancement without losing or duplicating state.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::ignored_unit_patterns)]

pub mod channel;
pub mod constants;
pub mod panels;
pub mod session;
pub mod storage;
pub mod timer;
pub mod view;
pub mod weights;

/// One unit of work for the session state machine
///
/// All three event sources — the server connection, the presentation
/// layer, and the tick scheduler — produce into a single ordered queue of
/// these, and the session consumes them one at a time. That serialization
/// is what guarantees a hint is fully applied before any later tick or
/// submission is looked at.
#[derive(Debug, Clone, derive_more::From)]
pub enum Event {
    /// An inbound message from the server
    Server(channel::ServerMessage),
    /// A user action emitted by the presentation layer
    Intent(session::Intent),
    /// A timer tick previously accepted through the scheduling seam
    Alarm(session::AlarmMessage),
}
