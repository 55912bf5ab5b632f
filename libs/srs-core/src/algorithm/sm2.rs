//! SM-2 spaced repetition algorithm.
//!
//! Ratings below `Good` count as a lapse: the streak resets and the card comes
//! back the next day with a lower ease. `Good` and `Easy` extend the streak;
//! the first success schedules six days out, later ones multiply the previous
//! interval by the updated ease.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Quality, ReviewState, DEFAULT_EASE_FACTOR, MINIMUM_EASE_FACTOR};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Subtracted from the ease on a lapse.
    pub lapse_penalty: f64,
    /// Added to the ease on an `Easy` rating.
    pub easy_bonus: f64,
    /// Interval in days after a lapse.
    pub lapse_interval: u32,
    /// Interval in days after the first successful review.
    pub first_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: MINIMUM_EASE_FACTOR,
            lapse_penalty: 0.15,
            easy_bonus: 0.15,
            lapse_interval: 1,
            first_interval: 6,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> ReviewState {
        ReviewState {
            ease_factor: self.initial_ease,
            repetition_count: 0,
            interval: 0,
            next_review_date: now,
        }
    }

    fn schedule(
        &self,
        state: &ReviewState,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let (ease_factor, repetition_count) = if quality < Quality::Good {
            // Hard is a lapse too, same as Again.
            ((state.ease_factor - self.lapse_penalty).max(self.minimum_ease), 0)
        } else {
            let delta = if quality == Quality::Easy { self.easy_bonus } else { 0.0 };
            (
                (state.ease_factor + delta).max(self.minimum_ease),
                state.repetition_count.saturating_add(1),
            )
        };

        let interval = match repetition_count {
            0 => self.lapse_interval,
            1 => self.first_interval,
            _ => (f64::from(state.interval) * ease_factor).round() as u32,
        };

        let next_due = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SchedulingResult {
            new_state: ReviewState {
                ease_factor,
                repetition_count,
                interval,
                next_review_date: next_due,
            },
            next_due,
        }
    }
}
