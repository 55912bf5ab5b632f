//! Flashcard store boundary.
//!
//! The engine never persists anything itself. A store hands it cards, takes
//! back updated review states and keeps the review history.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::error::{Result, SrsError};
use crate::status::is_available;
use crate::types::{Card, ReviewEvent, ReviewState};

/// Persisted collection of cards keyed by id.
///
/// Writes take `&mut self`, so reviews against one store are applied one at a
/// time. Implementations shared across threads must keep that guarantee.
pub trait FlashcardStore {
    fn all_cards(&self) -> Result<Vec<Card>>;

    fn card(&self, id: i64) -> Result<Option<Card>>;

    /// Cards whose next review instant has been reached, new cards included.
    fn cards_due_for_review(&self, now: DateTime<Utc>) -> Result<Vec<Card>> {
        Ok(self
            .all_cards()?
            .into_iter()
            .filter(|card| is_available(&card.review, now))
            .collect())
    }

    fn save_card(&mut self, id: i64, review: ReviewState) -> Result<()>;

    fn record_review_event(&mut self, event: ReviewEvent) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cards: BTreeMap<i64, Card>,
    events: Vec<ReviewEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `cards`. A later card replaces an earlier one with
    /// the same id; callers loading untrusted input check with
    /// [`ensure_unique_ids`] first.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().map(|card| (card.id, card)).collect(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[ReviewEvent] {
        &self.events
    }

    pub fn events_for(&self, card_id: i64) -> impl Iterator<Item = &ReviewEvent> {
        self.events.iter().filter(move |e| e.card_id == card_id)
    }

    pub fn into_parts(self) -> (Vec<Card>, Vec<ReviewEvent>) {
        (self.cards.into_values().collect(), self.events)
    }
}

/// Reject a card list in which two cards share an id.
pub fn ensure_unique_ids(cards: &[Card]) -> Result<()> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card.id) {
            return Err(SrsError::DuplicateId(card.id));
        }
    }
    Ok(())
}

impl FlashcardStore for MemoryStore {
    fn all_cards(&self) -> Result<Vec<Card>> {
        Ok(self.cards.values().cloned().collect())
    }

    fn card(&self, id: i64) -> Result<Option<Card>> {
        Ok(self.cards.get(&id).cloned())
    }

    fn save_card(&mut self, id: i64, review: ReviewState) -> Result<()> {
        let card = self.cards.get_mut(&id).ok_or(SrsError::CardNotFound(id))?;
        card.review = review;
        Ok(())
    }

    fn record_review_event(&mut self, event: ReviewEvent) -> Result<()> {
        self.events.push(event);
        Ok(())
    }
}
