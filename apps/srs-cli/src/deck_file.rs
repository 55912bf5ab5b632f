//! JSON card file read and rewritten by the CLI.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use srs_core::{
    ensure_unique_ids, Card, DeckSettings, EffectiveSettings, GlobalSettings, MemoryStore,
    ReviewEvent, ReviewState,
};
use tempfile::NamedTempFile;

/// On-disk snapshot of cards, their review history and study settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckFile {
    /// File-level settings; when absent the environment decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GlobalSettings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decks: Vec<DeckSettings>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub events: Vec<ReviewEvent>,
}

impl DeckFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read card file {}", path.display()))?;
        let file: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse card file {}", path.display()))?;

        ensure_unique_ids(&file.cards)
            .with_context(|| format!("invalid card file {}", path.display()))?;
        if let Some(settings) = &file.settings {
            settings.validate()?;
        }
        for deck in &file.decks {
            deck.validate()?;
        }

        tracing::debug!("Loaded {} cards from {:?}", file.cards.len(), path);
        Ok(file)
    }

    /// Write the file by replacing it with a fully written temp file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(temp.as_file_mut(), self)?;
        temp.as_file_mut().write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        tracing::debug!("Saved {} cards to {:?}", self.cards.len(), path);
        Ok(())
    }

    /// Settings for `deck`, falling back to `env` when the file has none.
    pub fn effective_settings(
        &self,
        env: &GlobalSettings,
        deck: Option<&str>,
    ) -> EffectiveSettings {
        let global = self.settings.as_ref().unwrap_or(env);
        let overrides = deck.and_then(|name| self.decks.iter().find(|d| d.deck == name));
        EffectiveSettings::merge(global, overrides)
    }

    /// Cards belonging to `deck`, or every card when no deck is given.
    pub fn cards_in(&self, deck: Option<&str>) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| deck.is_none() || card.deck.as_deref() == deck)
            .cloned()
            .collect()
    }

    pub fn to_store(&self) -> MemoryStore {
        MemoryStore::from_cards(self.cards.clone())
    }

    /// Copy review states back from `store`, keeping the file's card order,
    /// and append its new events to the history.
    pub fn absorb(&mut self, store: MemoryStore) {
        let (cards, events) = store.into_parts();
        let mut reviews: HashMap<i64, ReviewState> =
            cards.into_iter().map(|card| (card.id, card.review)).collect();
        for card in &mut self.cards {
            if let Some(review) = reviews.remove(&card.id) {
                card.review = review;
            }
        }
        self.events.extend(events);
    }
}
