use crate::models::{Timestamp, MS_PER_DAY};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for the scheduler's callers.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Clamps a pre-1970 system clock to the epoch
        Timestamp::from_millis(Utc::now().timestamp_millis()).unwrap_or(Timestamp::EPOCH)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(start: Timestamp) -> Self {
        FixedClock {
            millis: AtomicI64::new(start.as_millis()),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.millis.store(at.as_millis(), Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: u32) {
        self.millis
            .fetch_add(i64::from(days) * MS_PER_DAY, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis.load(Ordering::SeqCst)).unwrap_or(Timestamp::EPOCH)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
