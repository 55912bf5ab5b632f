//! Subcommand implementations.
//!
//! Each command works on an already loaded `DeckFile` and returns a value the
//! caller prints, so the commands stay testable without touching stdout.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srs_core::settings::MAX_PLAN_LIMIT;
use srs_core::{
    build_study_plan, classify, submit_review, GlobalSettings, Quality, QueueStats,
    ReviewStatus, SchedulingResult,
};

use crate::deck_file::DeckFile;

/// One row of a printed study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub position: usize,
    pub id: i64,
    pub front: String,
    pub status: ReviewStatus,
    pub next_review_date: DateTime<Utc>,
    pub interval: u32,
}

/// Build the study plan for the file, optionally restricted to one deck.
pub fn plan(
    file: &DeckFile,
    env: &GlobalSettings,
    deck: Option<&str>,
    limit: Option<usize>,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<PlanEntry>> {
    let settings = file.effective_settings(env, deck);
    let limit = limit.unwrap_or(settings.plan_limit);
    if limit > MAX_PLAN_LIMIT {
        bail!("--limit {} exceeds maximum of {}", limit, MAX_PLAN_LIMIT);
    }

    let cards = file.cards_in(deck);
    let plan = build_study_plan(&cards, now, limit);
    tracing::info!("Planned {} of {} cards", plan.len(), cards.len());

    Ok(plan
        .into_iter()
        .enumerate()
        .map(|(index, card)| PlanEntry {
            position: index + 1,
            status: classify(&card.review, now),
            id: card.id,
            next_review_date: card.review.next_review_date,
            interval: card.review.interval,
            front: card.front,
        })
        .collect())
}

/// Apply one rating to a card in the file.
pub fn review(
    file: &mut DeckFile,
    env: &GlobalSettings,
    card_id: i64,
    quality: Quality,
    response_time_ms: Option<u64>,
    now: DateTime<Utc>,
) -> anyhow::Result<SchedulingResult> {
    let deck = file
        .cards
        .iter()
        .find(|card| card.id == card_id)
        .and_then(|card| card.deck.clone());
    let settings = file.effective_settings(env, deck.as_deref());
    let algorithm = settings.algorithm.build();

    let mut store = file.to_store();
    let result = submit_review(
        &mut store,
        algorithm.as_ref(),
        card_id,
        quality,
        response_time_ms,
        now,
    )
    .with_context(|| format!("failed to review card {}", card_id))?;
    file.absorb(store);

    Ok(result)
}

/// Queue counts plus a summary of the recorded review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub queue: QueueStats,
    pub reviews: usize,
    pub correct: usize,
    pub accuracy: f64,
}

pub fn stats(file: &DeckFile, deck: Option<&str>, now: DateTime<Utc>) -> StatsReport {
    let cards = file.cards_in(deck);
    let ids: Vec<i64> = cards.iter().map(|card| card.id).collect();
    let events: Vec<_> = file
        .events
        .iter()
        .filter(|event| ids.contains(&event.card_id))
        .collect();
    let correct = events.iter().filter(|event| event.was_correct).count();

    StatsReport {
        queue: QueueStats::from_cards(&cards, now),
        reviews: events.len(),
        correct,
        accuracy: if events.is_empty() {
            0.0
        } else {
            correct as f64 / events.len() as f64
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use srs_core::Card;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 12, 6, 0, 0).unwrap()
    }

    fn file() -> DeckFile {
        let mut due = Card::new(10, "The bus is late again.", "", now()).with_deck("daily");
        due.review.repetition_count = 2;
        due.review.interval = 6;
        due.review.next_review_date = now() - Duration::days(2);

        DeckFile {
            cards: vec![
                due,
                Card::new(11, "Could you repeat that?", "", now()).with_deck("daily"),
                Card::new(12, "Prices went up.", "", now()),
            ],
            ..DeckFile::default()
        }
    }

    #[test]
    fn plan_lists_new_cards_first() {
        let entries = plan(&file(), &GlobalSettings::default(), None, None, now()).unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        assert_eq!(entries[2].status, ReviewStatus::Due);
        assert_eq!(entries[0].position, 1);
    }

    #[test]
    fn plan_respects_deck_and_limit() {
        let entries =
            plan(&file(), &GlobalSettings::default(), Some("daily"), Some(1), now()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 11);
    }

    #[test]
    fn plan_with_zero_limit_is_empty() {
        let entries = plan(&file(), &GlobalSettings::default(), None, Some(0), now()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn plan_rejects_oversized_limit() {
        assert!(plan(&file(), &GlobalSettings::default(), None, Some(5000), now()).is_err());
    }

    #[test]
    fn review_updates_card_and_history() {
        let mut file = file();
        let result = review(
            &mut file,
            &GlobalSettings::default(),
            10,
            Quality::Good,
            Some(2100),
            now(),
        )
        .unwrap();

        assert_eq!(result.new_state.repetition_count, 3);
        assert_eq!(result.new_state.interval, 15);
        let card = file.cards.iter().find(|c| c.id == 10).unwrap();
        assert_eq!(card.review, result.new_state);
        assert_eq!(file.events.len(), 1);
        assert_eq!(file.events[0].response_time_ms, Some(2100));
    }

    #[test]
    fn review_unknown_card_leaves_file_untouched() {
        let mut file = file();
        let before = file.clone();
        let err = review(&mut file, &GlobalSettings::default(), 99, Quality::Easy, None, now())
            .unwrap_err();
        assert!(err.to_string().contains("99"));
        assert_eq!(file, before);
    }

    #[test]
    fn stats_summarize_queue_and_history() {
        let mut file = file();
        review(&mut file, &GlobalSettings::default(), 11, Quality::Again, None, now()).unwrap();
        review(&mut file, &GlobalSettings::default(), 12, Quality::Good, None, now()).unwrap();

        let report = stats(&file, None, now());

        assert_eq!(
            report.queue,
            QueueStats {
                new_count: 1,
                due_count: 1,
                learning_count: 1,
            }
        );
        assert_eq!(report.reviews, 2);
        assert_eq!(report.correct, 1);
        assert_eq!(report.accuracy, 0.5);
    }
}
