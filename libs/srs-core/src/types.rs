//! Core types for the scheduling engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SrsError;

/// Ease factor assigned to a card that has never been reviewed.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Floor below which the ease factor never drops after an update.
pub const MINIMUM_EASE_FACTOR: f64 = 1.3;

/// Recall quality reported by the reviewer for one review event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Again,
    Hard,
    Good,
    Easy,
}

impl Quality {
    /// Numeric value on the 0-3 scale.
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 0,
            Self::Hard => 1,
            Self::Good => 2,
            Self::Easy => 3,
        }
    }

    /// Create from a numeric value, rejecting anything outside 0-3.
    pub fn from_value(value: i64) -> Result<Self, SrsError> {
        match value {
            0 => Ok(Self::Again),
            1 => Ok(Self::Hard),
            2 => Ok(Self::Good),
            3 => Ok(Self::Easy),
            other => Err(SrsError::InvalidQuality(other)),
        }
    }

    /// Whether the review counts as a correct answer in the review history.
    pub fn is_correct(self) -> bool {
        self >= Self::Good
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl TryFrom<i64> for Quality {
    type Error = SrsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl FromStr for Quality {
    type Err = SrsError;

    /// Accepts either the rating name (`"good"`) or its numeric value (`"2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => match other.parse::<i64>() {
                Ok(value) => Self::from_value(value),
                Err(_) => Err(SrsError::UnknownQuality(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-card scheduling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub repetition_count: u32,
    /// Days until the next scheduled review.
    pub interval: u32,
    pub next_review_date: DateTime<Utc>,
}

impl ReviewState {
    /// State of a freshly created card, eligible for review immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            repetition_count: 0,
            interval: 0,
            next_review_date: now,
        }
    }
}

/// Coarse review status derived from a card's state and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    New,
    Due,
    Learning,
}

impl ReviewStatus {
    /// Study order precedence; lower values are studied first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Due => 1,
            Self::Learning => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Due => "due",
            Self::Learning => "learning",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dictation flashcard with its embedded review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    /// The sentence to dictate.
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    pub review: ReviewState,
}

impl Card {
    pub fn new(
        id: i64,
        front: impl Into<String>,
        back: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            deck: None,
            review: ReviewState::new(now),
        }
    }

    pub fn with_deck(mut self, deck: impl Into<String>) -> Self {
        self.deck = Some(deck.into());
        self
    }
}

/// One entry of the review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub card_id: i64,
    pub quality: Quality,
    pub was_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub reviewed_at: DateTime<Utc>,
    pub interval_before: u32,
    pub interval_after: u32,
    pub ease_before: f64,
    pub ease_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn quality_values_round_trip() {
        for value in 0..=3 {
            assert_eq!(Quality::from_value(value).unwrap().to_value() as i64, value);
        }
    }

    #[test]
    fn quality_out_of_range_is_rejected() {
        assert_eq!(Quality::from_value(4), Err(SrsError::InvalidQuality(4)));
        assert_eq!(Quality::from_value(-1), Err(SrsError::InvalidQuality(-1)));
        assert_eq!(Quality::try_from(9_i64), Err(SrsError::InvalidQuality(9)));
    }

    #[test]
    fn quality_parses_names_and_numbers() {
        assert_eq!("Hard".parse::<Quality>().unwrap(), Quality::Hard);
        assert_eq!("3".parse::<Quality>().unwrap(), Quality::Easy);
        assert_eq!("5".parse::<Quality>(), Err(SrsError::InvalidQuality(5)));
        assert_eq!(
            "perfect".parse::<Quality>(),
            Err(SrsError::UnknownQuality("perfect".to_string()))
        );
    }

    #[test]
    fn quality_correctness_threshold_is_good() {
        assert!(!Quality::Again.is_correct());
        assert!(!Quality::Hard.is_correct());
        assert!(Quality::Good.is_correct());
        assert!(Quality::Easy.is_correct());
    }

    #[test]
    fn new_review_state_uses_defaults() {
        let state = ReviewState::new(now());
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.repetition_count, 0);
        assert_eq!(state.interval, 0);
        assert_eq!(state.next_review_date, now());
    }

    #[test]
    fn card_serializes_snake_case() {
        let card = Card::new(7, "The cat sat on the mat.", "", now()).with_deck("beginner");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["deck"], "beginner");
        assert_eq!(json["review"]["repetition_count"], 0);
        assert_eq!(json["review"]["ease_factor"], 2.5);
    }

    #[test]
    fn status_precedence_orders_new_due_learning() {
        assert!(ReviewStatus::New.precedence() < ReviewStatus::Due.precedence());
        assert!(ReviewStatus::Due.precedence() < ReviewStatus::Learning.precedence());
    }
}
