//! Accusation evaluation against the collected clues.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::clues::ClueCollection;
use crate::domain::lookup::LookupTable;

/// Minimum number of matching clues that sustains an accusation.
pub const SUSTAIN_THRESHOLD: usize = 2;

/// Classification of a verdict for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sustained,
    Insufficient,
    NoEvidence,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Sustained => "accusation sustained",
            Outcome::Insufficient => "insufficient evidence",
            Outcome::NoEvidence => "no evidence",
        };
        f.write_str(s)
    }
}

/// Result of evaluating one accusation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accused: String,
    pub match_count: usize,
    /// Matching clues in ascending order.
    pub matching_clues: Vec<String>,
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        self.outcome_with(SUSTAIN_THRESHOLD)
    }

    /// Classifies with a custom threshold; a threshold of 0 is treated as 1.
    pub fn outcome_with(&self, threshold: usize) -> Outcome {
        match self.match_count {
            0 => Outcome::NoEvidence,
            n if n >= threshold.max(1) => Outcome::Sustained,
            _ => Outcome::Insufficient,
        }
    }
}

/// Counts the collected clues that point at `accused`.
///
/// Suspect names are compared ASCII case-insensitively. Clues without an
/// association are skipped.
#[instrument(level = "debug", skip(collection, table))]
pub fn evaluate(collection: &ClueCollection, table: &LookupTable, accused: &str) -> Verdict {
    let matching_clues: Vec<String> = collection
        .in_order()
        .filter(|clue| {
            table
                .get(clue)
                .is_some_and(|suspect| suspect.eq_ignore_ascii_case(accused))
        })
        .map(str::to_string)
        .collect();
    debug!("{} of {} clues point at {}", matching_clues.len(), collection.len(), accused);

    Verdict {
        accused: accused.to_string(),
        match_count: matching_clues.len(),
        matching_clues,
    }
}
