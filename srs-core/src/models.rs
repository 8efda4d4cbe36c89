use crate::config::SchedulerConfig;
use crate::error::{Error, Result};
use crate::spaced_repetition::compute_mastery;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A learner's progress, keyed by item and kept in insertion order.
pub type ProgressMap = IndexMap<ItemId, ProgressRecord>;

/// A vocabulary item: a normalized word plus the language it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId {
    language: String,
    word: String,
}

impl ItemId {
    pub fn new(word: &str, language: &str) -> Result<Self> {
        let word = word.trim().to_lowercase();
        let language = language.trim().to_lowercase();

        if word.is_empty() {
            return Err(Error::InvalidItemId {
                input: format!("{language}:{word}"),
                reason: "word is empty",
            });
        }
        if language.is_empty() {
            return Err(Error::InvalidItemId {
                input: format!("{language}:{word}"),
                reason: "language tag is empty",
            });
        }
        if language.contains(':') {
            return Err(Error::InvalidItemId {
                input: format!("{language}:{word}"),
                reason: "language tag must not contain ':'",
            });
        }

        Ok(ItemId { language, word })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.language, self.word)
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((language, word)) => ItemId::new(word, language),
            None => Err(Error::InvalidItemId {
                input: s.to_string(),
                reason: "expected \"<language>:<word>\"",
            }),
        }
    }
}

impl TryFrom<String> for ItemId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_string()
    }
}

/// Milliseconds since the Unix epoch. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis < 0 {
            return Err(Error::InvalidTimestamp(millis.to_string()));
        }
        Ok(Timestamp(millis))
    }

    /// Accepts the floating point millisecond values browsers hand out.
    pub fn from_millis_f64(millis: f64) -> Result<Self> {
        if !millis.is_finite() || millis < 0.0 || millis > i64::MAX as f64 {
            return Err(Error::InvalidTimestamp(millis.to_string()));
        }
        Ok(Timestamp(millis.floor() as i64))
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self> {
        Self::from_millis(datetime.timestamp_millis())
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    pub fn plus_days(self, days: u32) -> Timestamp {
        Timestamp(self.0.saturating_add(i64::from(days) * MS_PER_DAY))
    }

    /// Milliseconds elapsed since `earlier`; negative if `earlier` is in the future.
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Timestamp::from_millis(value)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// How well a review went, 0 (blackout) to 5 (perfect recall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ReviewQuality(u8);

impl ReviewQuality {
    pub const MAX: u8 = 5;

    pub fn from_u8(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidQuality(i64::from(value)));
        }
        Ok(ReviewQuality(value))
    }

    /// Saturates at 5 instead of failing.
    pub(crate) fn saturating(value: u8) -> Self {
        ReviewQuality(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<i64> for ReviewQuality {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| Error::InvalidQuality(value))
            .and_then(ReviewQuality::from_u8)
    }
}

impl From<ReviewQuality> for u8 {
    fn from(quality: ReviewQuality) -> Self {
        quality.0
    }
}

/// A signal observed by the presentation layer while a word was on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionKind {
    /// The learner marked the word as known.
    Recognized,
    /// The word was read in place without asking for help.
    Seen,
    Pronunciation,
    Hover,
    Explanation,
    Other(String),
}

impl InteractionKind {
    pub fn as_str(&self) -> &str {
        match self {
            InteractionKind::Recognized => "recognized",
            InteractionKind::Seen => "seen",
            InteractionKind::Pronunciation => "pronunciation",
            InteractionKind::Hover => "hover",
            InteractionKind::Explanation => "explanation",
            InteractionKind::Other(name) => name,
        }
    }
}

impl From<&str> for InteractionKind {
    fn from(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "recognized" => InteractionKind::Recognized,
            "seen" => InteractionKind::Seen,
            "pronunciation" => InteractionKind::Pronunciation,
            "hover" => InteractionKind::Hover,
            "explanation" => InteractionKind::Explanation,
            _ => InteractionKind::Other(name.to_string()),
        }
    }
}

impl From<String> for InteractionKind {
    fn from(name: String) -> Self {
        InteractionKind::from(name.as_str())
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub item: ItemId,
    pub ease_factor: f64,
    pub interval: u32, // days
    pub repetitions: u32,
    pub last_seen: Timestamp,
    pub next_review: Timestamp,
    pub total_seen: u32,
    pub correct_count: u32,
    pub mastery: u8,
}

impl ProgressRecord {
    /// The state of an item that has never been reviewed.
    pub fn new(item: ItemId, ease_factor: f64, now: Timestamp) -> Self {
        ProgressRecord {
            item,
            ease_factor,
            interval: 0,
            repetitions: 0,
            last_seen: now,
            next_review: now,
            total_seen: 0,
            correct_count: 0,
            mastery: 0,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    /// Checks the record invariants. Storage adapters run this on every record they load.
    pub fn validate(&self, config: &SchedulerConfig) -> Result<()> {
        let invalid = |reason: String| Error::InvalidRecord {
            id: self.item.to_string(),
            reason,
        };

        if !self.ease_factor.is_finite() || self.ease_factor < config.min_ease {
            return Err(invalid(format!(
                "ease factor {} is below the floor of {}",
                self.ease_factor, config.min_ease
            )));
        }
        if self.correct_count > self.total_seen {
            return Err(invalid(format!(
                "correct count {} exceeds total seen {}",
                self.correct_count, self.total_seen
            )));
        }
        if self.next_review != self.last_seen.plus_days(self.interval) {
            return Err(invalid("next review is not last seen plus the interval".to_string()));
        }
        let expected = compute_mastery(self);
        if self.mastery != expected {
            return Err(invalid(format!(
                "stored mastery {} does not match derived mastery {}",
                self.mastery, expected
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueItem {
    pub item: ItemId,
    pub overdue_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_words: usize,
    pub mastered: usize,
    pub in_progress: usize,
    pub due: usize,
    pub average_mastery: f64,
    pub reviewed_today: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    pub language: String,
    pub total_words: usize,
    pub due: usize,
    pub mastered: usize,
    pub average_mastery: f64,
}
