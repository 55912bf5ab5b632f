//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Quality, ReviewState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub new_state: ReviewState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after a review. Never mutates `state`.
    fn schedule(
        &self,
        state: &ReviewState,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> SchedulingResult;

    /// Initial state for a card created at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> ReviewState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

/// Apply one review to `state` with the default SM-2 parameters.
pub fn update_review_state(
    state: &ReviewState,
    quality: Quality,
    now: DateTime<Utc>,
) -> ReviewState {
    sm2::Sm2::default().schedule(state, quality, now).new_state
}
