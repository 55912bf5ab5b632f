//! Spaced-repetition scheduling engine for dictation practice.
//!
//! Provides:
//! - SM-2 interval model (`update_review_state`)
//! - Review status classification (`classify`)
//! - Priority ordering and bounded study plans
//! - Store boundary, review submission and study sessions
//! - Study settings with per-deck overrides

pub mod algorithm;
pub mod error;
pub mod queue;
pub mod session;
pub mod settings;
pub mod status;
pub mod store;
pub mod types;

pub use algorithm::{
    get_algorithm, update_review_state, SchedulingResult, SpacedRepetitionAlgorithm,
};
pub use error::{Result, SrsError};
pub use queue::{build_study_plan, sort_by_priority, QueueStats, DEFAULT_PLAN_LIMIT};
pub use session::{submit_review, SessionStats, StudySession};
pub use settings::{Algorithm, DeckSettings, EffectiveSettings, GlobalSettings};
pub use status::{classify, is_available};
pub use store::{ensure_unique_ids, FlashcardStore, MemoryStore};
pub use types::{Card, Quality, ReviewEvent, ReviewState, ReviewStatus};
