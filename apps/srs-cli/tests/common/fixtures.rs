//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use srs_cli::deck_file::DeckFile;
use srs_core::Card;

/// Fixed evaluation time used across tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
}

/// A brand-new card.
pub fn new_card(id: i64) -> Card {
    Card::new(id, format!("Dictation sentence number {}.", id), "", now())
}

/// A card with a streak whose next review is `offset_days` from `now()`.
pub fn reviewed_card(id: i64, offset_days: i64) -> Card {
    let mut card = new_card(id);
    card.review.repetition_count = 2;
    card.review.interval = 6;
    card.review.next_review_date = now() + Duration::days(offset_days);
    card
}

/// Five cards: two new, two due, one learning.
pub fn mixed_file() -> DeckFile {
    DeckFile {
        cards: vec![
            reviewed_card(1, 4),
            reviewed_card(2, -1),
            new_card(3),
            reviewed_card(4, -3),
            new_card(5),
        ],
        ..DeckFile::default()
    }
}
