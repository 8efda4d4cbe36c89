use crate::clock::{Clock, SystemClock};
use crate::config::SchedulerConfig;
use crate::error::{Error, Result};
use crate::models::{DueItem, InteractionKind, ItemId, LanguageStats, ProgressRecord, ReviewQuality, ReviewStats};
use crate::spaced_repetition::SpacedRepetition;
use crate::storage::ProgressStore;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// Runs the read, schedule, write cycle for one learner against a store.
pub struct ProgressService<S: ProgressStore> {
    store: S,
    scheduler: SpacedRepetition,
    clock: Box<dyn Clock>,
    rng: Mutex<ChaCha8Rng>,
    // Serializes read-modify-write cycles against the store
    review_lock: Mutex<()>,
}

impl<S: ProgressStore> ProgressService<S> {
    pub fn new(store: S, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(ProgressService {
            store,
            scheduler: SpacedRepetition::new(config),
            clock: Box::new(SystemClock),
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
            review_lock: Mutex::new(()),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    pub fn scheduler(&self) -> &SpacedRepetition {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn review(&self, id: &ItemId, quality: ReviewQuality) -> Result<ProgressRecord> {
        let _guard = self.review_lock.lock().map_err(|_| Error::Lock("review"))?;

        let existing = self.store.get(id)?;
        let updated = self
            .scheduler
            .record_review(id, existing.as_ref(), quality, self.clock.now());
        self.store.set(id, updated.clone())?;

        info!(
            "Stored review of {} (quality {}), next review in {} days",
            id,
            quality.value(),
            updated.interval
        );
        Ok(updated)
    }

    pub fn record_interaction(&self, id: &ItemId, kind: &InteractionKind) -> Result<ProgressRecord> {
        let quality = self.scheduler.classify_interaction(kind);
        self.review(id, quality)
    }

    pub fn progress(&self, id: &ItemId) -> Result<Option<ProgressRecord>> {
        self.store.get(id)
    }

    pub fn due_items(&self, limit: usize) -> Result<Vec<DueItem>> {
        let progress = self.store.entries()?;
        Ok(self.scheduler.due_for_review(&progress, self.clock.now(), limit))
    }

    pub fn words_to_present(&self, visible: &[ItemId], budget: usize) -> Result<Vec<ItemId>> {
        let progress = self.store.entries()?;
        let mut rng = self.rng.lock().map_err(|_| Error::Lock("random generator"))?;
        Ok(self
            .scheduler
            .select_for_presentation(&progress, visible, budget, self.clock.now(), &mut *rng))
    }

    pub fn stats(&self) -> Result<ReviewStats> {
        let progress = self.store.entries()?;
        Ok(self.scheduler.aggregate_statistics(&progress, self.clock.now()))
    }

    pub fn language_stats(&self) -> Result<Vec<LanguageStats>> {
        let progress = self.store.entries()?;
        Ok(self.scheduler.language_statistics(&progress, self.clock.now()))
    }
}
