//! Review status classification.

use chrono::{DateTime, Utc};

use crate::types::{ReviewState, ReviewStatus};

/// Whether the card's next review instant has been reached.
///
/// This is the only place the next-review time is compared against `now`;
/// stores filtering "due for review" cards go through it as well.
pub fn is_available(state: &ReviewState, now: DateTime<Utc>) -> bool {
    state.next_review_date <= now
}

/// Classify a card as new, due or still in its learning interval.
pub fn classify(state: &ReviewState, now: DateTime<Utc>) -> ReviewStatus {
    if state.repetition_count == 0 {
        ReviewStatus::New
    } else if is_available(state, now) {
        ReviewStatus::Due
    } else {
        ReviewStatus::Learning
    }
}
