//! Spaced repetition scheduling for vocabulary met while reading.
//!
//! [`SpacedRepetition`] is a pure SM-2 scheduler: callers hand it a learner's
//! [`ProgressMap`] and get updated records, due lists, page selections and
//! statistics back. [`ProgressService`] is the usual caller, pairing the
//! scheduler with a [`ProgressStore`], a [`Clock`] and a seeded generator.

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod progress_service;
pub mod shuffle;
pub mod spaced_repetition;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{InteractionPolicy, SchedulerConfig};
pub use error::{Error, Result};
pub use models::{
    DueItem, InteractionKind, ItemId, LanguageStats, ProgressMap, ProgressRecord, ReviewQuality, ReviewStats, Timestamp,
};
pub use progress_service::ProgressService;
pub use spaced_repetition::{compute_mastery, SpacedRepetition};
pub use storage::{JsonFileStore, MemoryStore, ProgressStore};
