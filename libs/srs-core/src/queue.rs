//! Study queue ordering and session plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::classify;
use crate::types::{Card, ReviewStatus};

/// Number of cards in a study plan when no limit is configured.
pub const DEFAULT_PLAN_LIMIT: usize = 20;

/// Order cards for study: new first, then due, then learning.
///
/// Within a status the earliest `next_review_date` comes first. The sort is
/// stable, so cards tied on both keys keep their input order.
pub fn sort_by_priority(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut keyed: Vec<(u8, &Card)> = cards
        .iter()
        .map(|card| (classify(&card.review, now).precedence(), card))
        .collect();

    keyed.sort_by(|(a_rank, a), (b_rank, b)| {
        a_rank
            .cmp(b_rank)
            .then_with(|| a.review.next_review_date.cmp(&b.review.next_review_date))
    });

    keyed.into_iter().map(|(_, card)| card.clone()).collect()
}

/// The first `limit` cards of the priority order. A limit of zero gives an
/// empty plan.
pub fn build_study_plan(cards: &[Card], now: DateTime<Utc>, limit: usize) -> Vec<Card> {
    if limit == 0 {
        return Vec::new();
    }
    let mut plan = sort_by_priority(cards, now);
    plan.truncate(limit);
    plan
}

/// Card counts per review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub new_count: usize,
    pub due_count: usize,
    pub learning_count: usize,
}

impl QueueStats {
    pub fn from_cards(cards: &[Card], now: DateTime<Utc>) -> Self {
        cards.iter().fold(Self::default(), |mut stats, card| {
            match classify(&card.review, now) {
                ReviewStatus::New => stats.new_count += 1,
                ReviewStatus::Due => stats.due_count += 1,
                ReviewStatus::Learning => stats.learning_count += 1,
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.new_count + self.due_count + self.learning_count
    }

    /// Cards that can be studied right now.
    pub fn actionable(&self) -> usize {
        self.new_count + self.due_count
    }
}
