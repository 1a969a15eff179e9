//! Session-scoped shared storage
//!
//! Upstream screens (login, category selection) write the player identity
//! and the category weight map before the quiz view mounts; the downstream
//! results view reads the latest score after it unmounts. The session only
//! touches this state through the [`SessionStore`] trait so hosts can back
//! it with whatever the platform provides.

use crate::weights::CategoryWeights;

/// Read/write access to the state shared with the surrounding screens
pub trait SessionStore {
    /// The stored player identity, written by the login flow
    fn player_id(&self) -> Option<String>;

    /// The stored category weight map, written by the selection screen
    ///
    /// Re-read at session start and at every advance, so a selection change
    /// between questions takes effect on the next `start_question`.
    fn category_weights(&self) -> Option<CategoryWeights>;

    /// Records the latest score for the results view to read
    fn store_score(&mut self, score: u64);
}

/// In-memory [`SessionStore`] for tests and hosts without platform storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    player_id: Option<String>,
    weights: Option<CategoryWeights>,
    score: Option<u64>,
}

impl MemoryStore {
    /// Sets the stored player identity
    pub fn set_player_id(&mut self, id: impl Into<String>) {
        self.player_id = Some(id.into());
    }

    /// Sets the stored category weight map
    pub fn set_category_weights(&mut self, weights: CategoryWeights) {
        self.weights = Some(weights);
    }

    /// The last score recorded by the session, if any
    pub fn score(&self) -> Option<u64> {
        self.score
    }
}

impl SessionStore for MemoryStore {
    fn player_id(&self) -> Option<String> {
        self.player_id.clone()
    }

    fn category_weights(&self) -> Option<CategoryWeights> {
        self.weights.clone()
    }

    fn store_score(&mut self, score: u64) {
        self.score = Some(score);
    }
}
