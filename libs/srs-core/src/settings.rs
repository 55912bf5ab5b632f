//! Study settings: global defaults with optional per-deck overrides.

use serde::{Deserialize, Serialize};

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::error::{Result, SrsError};
use crate::queue::DEFAULT_PLAN_LIMIT;

/// Largest study plan a settings object may request.
pub const MAX_PLAN_LIMIT: usize = 1000;

/// Algorithm options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Sm2,
}

impl Algorithm {
    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm2 => "sm2",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sm2" => Some(Self::Sm2),
            _ => None,
        }
    }

    /// Instantiate the algorithm with its default parameters.
    pub fn build(&self) -> Box<dyn SpacedRepetitionAlgorithm> {
        match self {
            Self::Sm2 => Box::new(Sm2::default()),
        }
    }
}

/// Global settings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub algorithm: Algorithm,
    pub plan_limit: usize,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            plan_limit: DEFAULT_PLAN_LIMIT,
        }
    }
}

impl GlobalSettings {
    pub fn validate(&self) -> Result<()> {
        validate_plan_limit(self.plan_limit)
    }
}

/// Per-deck settings (all fields optional for overrides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSettings {
    pub deck: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_limit: Option<usize>,
}

impl DeckSettings {
    /// Create new deck settings with only the deck name set.
    pub fn new(deck: impl Into<String>) -> Self {
        Self {
            deck: deck.into(),
            algorithm: None,
            plan_limit: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.plan_limit {
            Some(limit) => validate_plan_limit(limit),
            None => Ok(()),
        }
    }
}

/// Effective settings (global merged with deck overrides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub algorithm: Algorithm,
    pub plan_limit: usize,
}

impl EffectiveSettings {
    /// Merge global settings with optional deck settings.
    pub fn merge(global: &GlobalSettings, deck: Option<&DeckSettings>) -> Self {
        match deck {
            Some(d) => Self {
                algorithm: d.algorithm.unwrap_or(global.algorithm),
                plan_limit: d.plan_limit.unwrap_or(global.plan_limit),
            },
            None => Self {
                algorithm: global.algorithm,
                plan_limit: global.plan_limit,
            },
        }
    }
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::merge(&GlobalSettings::default(), None)
    }
}

fn validate_plan_limit(limit: usize) -> Result<()> {
    if limit > MAX_PLAN_LIMIT {
        return Err(SrsError::InvalidSettings(format!(
            "plan_limit {} exceeds maximum of {}",
            limit, MAX_PLAN_LIMIT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_use_sm2_and_twenty_cards() {
        let settings = EffectiveSettings::default();
        assert_eq!(settings.algorithm, Algorithm::Sm2);
        assert_eq!(settings.plan_limit, 20);
    }

    #[test]
    fn deck_overrides_win_over_global() {
        let global = GlobalSettings::default();
        let deck = DeckSettings {
            plan_limit: Some(5),
            ..DeckSettings::new("idioms")
        };

        let merged = EffectiveSettings::merge(&global, Some(&deck));

        assert_eq!(
            merged,
            EffectiveSettings {
                algorithm: Algorithm::Sm2,
                plan_limit: 5,
            }
        );
    }

    #[test]
    fn empty_deck_settings_fall_back_to_global() {
        let global = GlobalSettings {
            plan_limit: 50,
            ..GlobalSettings::default()
        };
        let merged = EffectiveSettings::merge(&global, Some(&DeckSettings::new("news")));
        assert_eq!(merged.plan_limit, 50);
    }

    #[test]
    fn oversized_plan_limit_is_rejected() {
        let global = GlobalSettings {
            plan_limit: MAX_PLAN_LIMIT + 1,
            ..GlobalSettings::default()
        };
        assert!(matches!(global.validate(), Err(SrsError::InvalidSettings(_))));

        let deck = DeckSettings {
            plan_limit: Some(MAX_PLAN_LIMIT),
            ..DeckSettings::new("a")
        };
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn algorithm_names_round_trip() {
        assert_eq!(Algorithm::from_str("sm2"), Some(Algorithm::Sm2));
        assert_eq!(Algorithm::from_str("fsrs"), None);
        assert_eq!(Algorithm::Sm2.build().name(), "sm2");
    }

    #[test]
    fn global_settings_fill_missing_fields_from_defaults() {
        let parsed: GlobalSettings = serde_json::from_str(r#"{"plan_limit": 8}"#).unwrap();
        assert_eq!(parsed.algorithm, Algorithm::Sm2);
        assert_eq!(parsed.plan_limit, 8);
    }
}
