//! Review submission and study sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::error::{Result, SrsError};
use crate::queue::build_study_plan;
use crate::settings::EffectiveSettings;
use crate::store::FlashcardStore;
use crate::types::{Card, Quality, ReviewEvent};

/// Apply one rating to a stored card.
///
/// Loads the card, schedules it, saves the new state and appends a review
/// event. Nothing is written if the card does not exist.
pub fn submit_review<S: FlashcardStore + ?Sized>(
    store: &mut S,
    algorithm: &dyn SpacedRepetitionAlgorithm,
    card_id: i64,
    quality: Quality,
    response_time_ms: Option<u64>,
    now: DateTime<Utc>,
) -> Result<SchedulingResult> {
    let card = match store.card(card_id)? {
        Some(card) => card,
        None => {
            tracing::warn!(card_id, "review submitted for unknown card");
            return Err(SrsError::CardNotFound(card_id));
        }
    };

    let result = algorithm.schedule(&card.review, quality, now);
    tracing::debug!(
        card_id,
        algorithm = algorithm.name(),
        quality = %quality,
        ease = result.new_state.ease_factor,
        interval = result.new_state.interval,
        "scheduled card"
    );

    store.save_card(card_id, result.new_state.clone())?;
    store.record_review_event(ReviewEvent {
        card_id,
        quality,
        was_correct: quality.is_correct(),
        response_time_ms,
        reviewed_at: now,
        interval_before: card.review.interval,
        interval_after: result.new_state.interval,
        ease_before: card.review.ease_factor,
        ease_after: result.new_state.ease_factor,
    })?;

    tracing::info!(
        "Card {} rated {}, next review in {} day(s)",
        card_id,
        quality,
        result.new_state.interval
    );

    Ok(result)
}

/// Completion statistics for a study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total: usize,
    pub reviewed: usize,
    pub correct: usize,
    pub again: usize,
    pub skipped: usize,
    /// Share of reviewed cards answered `Good` or `Easy`, 0.0 when nothing was reviewed.
    pub accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_response_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Rated {
        quality: Quality,
        response_time_ms: Option<u64>,
    },
    Skipped,
}

/// Walks a bounded study plan one card at a time.
pub struct StudySession {
    plan: Vec<Card>,
    position: usize,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    outcomes: Vec<Outcome>,
}

impl StudySession {
    /// Build a session from the store's cards using the configured plan limit.
    pub fn start<S: FlashcardStore + ?Sized>(
        store: &S,
        settings: &EffectiveSettings,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let cards = store.all_cards()?;
        let plan = build_study_plan(&cards, now, settings.plan_limit);
        tracing::info!(
            "Starting study session with {} of {} cards",
            plan.len(),
            cards.len()
        );
        Ok(Self::from_plan(plan, settings.algorithm.build()))
    }

    pub fn from_plan(plan: Vec<Card>, algorithm: Box<dyn SpacedRepetitionAlgorithm>) -> Self {
        Self {
            plan,
            position: 0,
            algorithm,
            outcomes: Vec::new(),
        }
    }

    pub fn plan(&self) -> &[Card] {
        &self.plan
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.plan.get(self.position)
    }

    /// Rate the current card, persist the result and move to the next card.
    pub fn answer<S: FlashcardStore + ?Sized>(
        &mut self,
        store: &mut S,
        quality: Quality,
        response_time_ms: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<SchedulingResult> {
        let card_id = self.current_card().ok_or(SrsError::SessionComplete)?.id;
        let result = submit_review(
            store,
            self.algorithm.as_ref(),
            card_id,
            quality,
            response_time_ms,
            now,
        )?;

        self.plan[self.position].review = result.new_state.clone();
        self.outcomes.push(Outcome::Rated {
            quality,
            response_time_ms,
        });
        self.position += 1;

        if self.is_complete() {
            tracing::info!("Study session complete");
        }
        Ok(result)
    }

    /// Move past the current card without rating it.
    pub fn skip(&mut self) -> Result<()> {
        if self.is_complete() {
            return Err(SrsError::SessionComplete);
        }
        self.outcomes.push(Outcome::Skipped);
        self.position += 1;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.plan.len()
    }

    pub fn remaining(&self) -> usize {
        self.plan.len().saturating_sub(self.position)
    }

    pub fn stats(&self) -> SessionStats {
        let mut reviewed = 0;
        let mut correct = 0;
        let mut again = 0;
        let mut skipped = 0;
        let mut timed = 0u64;
        let mut total_ms = 0u64;

        for outcome in &self.outcomes {
            match *outcome {
                Outcome::Rated {
                    quality,
                    response_time_ms,
                } => {
                    reviewed += 1;
                    if quality.is_correct() {
                        correct += 1;
                    }
                    if quality == Quality::Again {
                        again += 1;
                    }
                    if let Some(ms) = response_time_ms {
                        timed += 1;
                        total_ms = total_ms.saturating_add(ms);
                    }
                }
                Outcome::Skipped => skipped += 1,
            }
        }

        SessionStats {
            total: self.plan.len(),
            reviewed,
            correct,
            again,
            skipped,
            accuracy: if reviewed == 0 {
                0.0
            } else {
                correct as f64 / reviewed as f64
            },
            average_response_ms: (timed > 0).then(|| total_ms / timed),
        }
    }
}
