//! Category weight map
//!
//! The player's chosen distribution of questions across categories. It is
//! produced by the category selection screen, stored in session-scoped
//! storage, and passed through to the server with every `start_question`
//! event; the session itself never interprets it.

use std::collections::BTreeMap;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::weights::MAX_TOTAL_QUESTIONS;

/// Validates that the selected question counts stay within the session total
///
/// # Errors
///
/// Returns a `garde::Error` if the counts sum to more than
/// [`MAX_TOTAL_QUESTIONS`].
fn validate_total(counts: &BTreeMap<String, u32>, _ctx: &()) -> garde::Result {
    let total: u32 = counts.values().sum();
    if total <= MAX_TOTAL_QUESTIONS {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "category counts sum to {total}, exceeding {MAX_TOTAL_QUESTIONS}"
        )))
    }
}

/// Mapping from category name to how many questions to draw from it
///
/// Serialized as a plain JSON object so it matches the wire payload of
/// `start_question` exactly. Ordered by category name for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryWeights {
    #[garde(custom(validate_total))]
    #[serde(flatten)]
    counts: BTreeMap<String, u32>,
}

impl CategoryWeights {
    /// Total number of questions requested across all categories
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Whether no category has been selected
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(category, count)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl FromIterator<(String, u32)> for CategoryWeights {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
