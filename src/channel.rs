//! Connection channel abstraction and wire messages
//!
//! This module defines the trait for the persistent bidirectional connection
//! the session talks to the server over, along with the typed forms of every
//! message that crosses it. The channel abstraction allows for different
//! transports while maintaining a consistent interface; the session never
//! sees raw sockets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{storage::SessionStore, weights::CategoryWeights};

/// Errors raised while preparing a connection
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No player identity in session storage; the login flow has not run
    #[error("no player identity in session storage")]
    MissingIdentity,
}

/// Parameters the transport needs to open a session connection
///
/// The address is parameterized by the stored player identity and the
/// configured question count; both come from the upstream screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectParams {
    /// Opaque player identity issued by the login flow
    pub player_id: String,
    /// Number of questions the session will play
    pub max_questions: u32,
}

impl ConnectParams {
    /// Builds connection parameters from session storage
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentity`] if no player identity has been
    /// stored yet.
    pub fn from_store<S: SessionStore>(store: &S, max_questions: u32) -> Result<Self, Error> {
        let player_id = store.player_id().ok_or(Error::MissingIdentity)?;
        Ok(Self {
            player_id,
            max_questions,
        })
    }

    /// Renders the connection path for the quiz endpoint
    pub fn path(&self) -> String {
        format!(
            "/ws/quiz/{}?maxQuestions={}",
            self.player_id, self.max_questions
        )
    }
}

/// Trait for sending events through a session connection
///
/// This trait abstracts the transport used to reach the server.
/// Implementations might use WebSockets or any other message-based
/// transport. Sends are fire-and-forget: an implementation must silently
/// drop a send while the connection is not open rather than fail, so a
/// transient disconnect never strands the player mid-question.
pub trait Channel {
    /// Sends an outbound event to the server
    fn send(&self, message: &ClientMessage);

    /// Closes the connection
    ///
    /// Called once on session teardown, after the session has emitted its
    /// best-effort `end_game` notification.
    fn close(self);
}

/// Events sent from the session to the server
///
/// Serialized as `{"type": ..., "payload": ...}` records matching the
/// server's dispatch format.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Requests the next question, carrying the category weight map
    StartQuestion(CategoryWeights),
    /// Submits the player's answer together with how many hints were seen
    SubmitAnswer {
        /// The answer text, possibly empty on timeout
        answer: String,
        /// Hints observed for the current question
        #[serde(rename = "hintCount")]
        hint_count: u32,
    },
    /// Best-effort notification that the session is ending
    EndGame {},
    /// Flags the just-revealed question as low quality
    DownvoteQuestion {},
}

impl ClientMessage {
    /// Converts the event to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Events arriving from the server
///
/// Dispatch is on the `type` field. Unrecognized types deserialize to
/// [`ServerMessage::Unknown`] so a newer server cannot crash the session,
/// and fields the server may omit are defaulted rather than rejected.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A progressive hint for the current question
    Hint {
        /// The hint text
        hint: String,
    },
    /// The scored result of an answer submission
    AnswerResult {
        /// Whether the submission was judged correct
        #[serde(default)]
        correct: bool,
        /// The player's new total score; absent leaves the score unchanged
        #[serde(default)]
        score: Option<u64>,
        /// The correct answer text; absent or empty displays as "Unknown"
        #[serde(default)]
        answer: Option<String>,
        /// The full hint list for the question
        #[serde(default)]
        hints: Vec<String>,
    },
    /// Informational status report, logged but otherwise ignored
    GameStatus {
        /// Human-readable status text
        status: String,
    },
    /// Any message type this client does not understand
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// Parses a raw inbound frame into a typed server message
    ///
    /// Malformed frames are logged and discarded, never propagated as an
    /// error: the connection keeps running on whatever the server sends
    /// next.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(error) => {
                tracing::warn!(%error, "discarding malformed server message");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_connect_params_from_store() {
        let mut store = MemoryStore::default();
        assert_eq!(
            ConnectParams::from_store(&store, 10),
            Err(Error::MissingIdentity)
        );

        store.set_player_id("17");
        let params = ConnectParams::from_store(&store, 10).unwrap();
        assert_eq!(params.path(), "/ws/quiz/17?maxQuestions=10");
    }

    #[test]
    fn test_start_question_wire_shape() {
        let weights: CategoryWeights = [("History".to_owned(), 3), ("Science".to_owned(), 2)]
            .into_iter()
            .collect();
        let message = ClientMessage::StartQuestion(weights);

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "start_question",
                "payload": {"History": 3, "Science": 2},
            })
        );
    }

    #[test]
    fn test_submit_answer_wire_shape() {
        let message = ClientMessage::SubmitAnswer {
            answer: "Paris".to_owned(),
            hint_count: 2,
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "submit_answer",
                "payload": {"answer": "Paris", "hintCount": 2},
            })
        );
    }

    #[test]
    fn test_empty_payload_wire_shapes() {
        assert_eq!(
            serde_json::to_value(ClientMessage::EndGame {}).unwrap(),
            json!({"type": "end_game", "payload": {}})
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::DownvoteQuestion {}).unwrap(),
            json!({"type": "downvote_question", "payload": {}})
        );
    }

    #[test]
    fn test_decode_hint() {
        let message = ServerMessage::decode(r#"{"type": "hint", "hint": "In Europe"}"#).unwrap();
        assert_eq!(
            message,
            ServerMessage::Hint {
                hint: "In Europe".to_owned()
            }
        );
    }

    #[test]
    fn test_decode_answer_result_full() {
        let raw = r#"{
            "type": "answer_result",
            "correct": true,
            "score": 150,
            "answer": "Paris",
            "hints": ["In Europe", "Capital city", "Eiffel Tower"]
        }"#;

        let message = ServerMessage::decode(raw).unwrap();
        assert_eq!(
            message,
            ServerMessage::AnswerResult {
                correct: true,
                score: Some(150),
                answer: Some("Paris".to_owned()),
                hints: vec![
                    "In Europe".to_owned(),
                    "Capital city".to_owned(),
                    "Eiffel Tower".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn test_decode_answer_result_missing_fields() {
        let message = ServerMessage::decode(r#"{"type": "answer_result"}"#).unwrap();
        assert_eq!(
            message,
            ServerMessage::AnswerResult {
                correct: false,
                score: None,
                answer: None,
                hints: vec![],
            }
        );
    }

    #[test]
    fn test_decode_unrecognized_type() {
        let message = ServerMessage::decode(r#"{"type": "leaderboard_update"}"#).unwrap();
        assert_eq!(message, ServerMessage::Unknown);
    }

    #[test]
    fn test_decode_malformed_is_discarded() {
        assert_eq!(ServerMessage::decode("not json"), None);
        assert_eq!(ServerMessage::decode(r#"{"hint": "no type"}"#), None);
    }
}
