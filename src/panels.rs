//! Hint panel store
//!
//! Each question has exactly three ordered hint slots. While the player is
//! answering, hints fill the slots one at a time in arrival order; on reveal
//! the full hint list from the server overwrites all slots atomically. The
//! store is mutated exclusively by the session state machine; the
//! presentation layer only reads it.

use serde::{Deserialize, Serialize};

use crate::constants::panels::SLOT_COUNT;

/// A single hint slot, either pending (placeholder) or revealed with content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Revealed hint text; `None` while the slot is a placeholder
    content: Option<String>,
    /// Whether the slot is shown to the player
    visible: bool,
}

impl Panel {
    /// Revealed hint text, if any
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether the slot is shown to the player
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The fixed set of three hint slots for the current question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPanels {
    slots: [Panel; SLOT_COUNT],
}

impl HintPanels {
    /// Returns every slot to the placeholder/hidden state
    ///
    /// Used at question start and immediately before a full reveal so the
    /// overwrite starts from a clean base.
    pub fn pending_reset(&mut self) {
        for slot in &mut self.slots {
            *slot = Panel::default();
        }
    }

    /// Fills the next empty slot with a newly arrived hint
    ///
    /// The primary path fills the first slot still in placeholder state. If
    /// every slot already holds content the hint lands in the first hidden
    /// slot, or slot 1 when all three are visible; this fallback keeps a
    /// misbehaving server from crashing the session. Returns `false` when
    /// the fallback was taken so the caller can log the anomaly.
    pub fn reveal_next(&mut self, hint: &str) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.content.is_none()) {
            *slot = Panel {
                content: Some(hint.to_owned()),
                visible: true,
            };
            return true;
        }

        let index = self
            .slots
            .iter()
            .position(|slot| !slot.visible)
            .unwrap_or(0);
        self.slots[index] = Panel {
            content: Some(hint.to_owned()),
            visible: true,
        };
        false
    }

    /// Overwrites all slots with the full hint list for the question
    ///
    /// Hints land at their ordinal position; slots beyond the list's length
    /// stay in placeholder state.
    pub fn reveal_all(&mut self, hints: &[String]) {
        self.pending_reset();
        for (slot, hint) in self.slots.iter_mut().zip(hints) {
            *slot = Panel {
                content: Some(hint.clone()),
                visible: true,
            };
        }
    }

    /// Number of slots currently visible to the player
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.visible).count()
    }

    /// All slots in order
    pub fn slots(&self) -> &[Panel] {
        &self.slots
    }
}
