//! Tuning values for the scheduler.

use crate::error::{Error, Result};
use crate::models::{InteractionKind, ReviewQuality};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_min_ease")]
    pub min_ease: f64,
    #[serde(default = "default_ease")]
    pub default_ease: f64,
    /// Interval in days for the first, second, ... consecutive success.
    #[serde(default = "default_interval_ladder")]
    pub interval_ladder: Vec<u32>,
    #[serde(default = "default_lapse_interval")]
    pub lapse_interval: u32,
    #[serde(default = "default_max_interval")]
    pub max_interval: u32,
    #[serde(default = "default_review_slots")]
    pub review_slots: usize,
    #[serde(default = "default_mastered_threshold")]
    pub mastered_threshold: u8,
    #[serde(default)]
    pub interactions: InteractionPolicy,
}

fn default_min_ease() -> f64 { 1.3 }
fn default_ease() -> f64 { 2.5 }
fn default_interval_ladder() -> Vec<u32> { vec![1, 3] }
fn default_lapse_interval() -> u32 { 1 }
fn default_max_interval() -> u32 { 36_500 }
fn default_review_slots() -> usize { 3 }
fn default_mastered_threshold() -> u8 { 80 }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_ease: default_min_ease(),
            default_ease: default_ease(),
            interval_ladder: default_interval_ladder(),
            lapse_interval: default_lapse_interval(),
            max_interval: default_max_interval(),
            review_slots: default_review_slots(),
            mastered_threshold: default_mastered_threshold(),
            interactions: InteractionPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SchedulerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_ease.is_finite() || self.min_ease <= 0.0 {
            return Err(Error::InvalidConfig(format!("min_ease must be positive, got {}", self.min_ease)));
        }
        if !self.default_ease.is_finite() || self.default_ease < self.min_ease {
            return Err(Error::InvalidConfig(format!(
                "default_ease {} is below min_ease {}",
                self.default_ease, self.min_ease
            )));
        }
        if self.interval_ladder.is_empty() {
            return Err(Error::InvalidConfig("interval_ladder must have at least one rung".to_string()));
        }
        if self.interval_ladder.contains(&0) {
            return Err(Error::InvalidConfig("interval_ladder rungs must be at least one day".to_string()));
        }
        // round(1 × ease) stays 1 while ease < 1.5
        if self.interval_ladder.last().is_some_and(|&rung| rung < 2) {
            return Err(Error::InvalidConfig(
                "last interval_ladder rung must be at least 2 days so intervals keep growing".to_string(),
            ));
        }
        if self.lapse_interval == 0 {
            return Err(Error::InvalidConfig("lapse_interval must be at least one day".to_string()));
        }
        let longest_rung = self.interval_ladder.iter().copied().max().unwrap_or(0);
        if self.max_interval < longest_rung.max(self.lapse_interval) {
            return Err(Error::InvalidConfig(format!(
                "max_interval {} is shorter than a fixed interval",
                self.max_interval
            )));
        }
        if self.mastered_threshold > 100 {
            return Err(Error::InvalidConfig(format!(
                "mastered_threshold must be at most 100, got {}",
                self.mastered_threshold
            )));
        }
        self.interactions.validate()
    }
}

/// Quality assigned to each interaction signal. Kept as data so it can be
/// tuned without touching the scheduling code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPolicy {
    #[serde(default = "quality_five")]
    pub recognized: u8,
    #[serde(default = "quality_four")]
    pub seen: u8,
    #[serde(default = "quality_three")]
    pub pronunciation: u8,
    #[serde(default = "quality_two")]
    pub hover: u8,
    #[serde(default = "quality_two")]
    pub explanation: u8,
    #[serde(default = "quality_three")]
    pub fallback: u8,
}

fn quality_five() -> u8 { 5 }
fn quality_four() -> u8 { 4 }
fn quality_three() -> u8 { 3 }
fn quality_two() -> u8 { 2 }

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self {
            recognized: 5,
            seen: 4,
            pronunciation: 3,
            hover: 2,
            explanation: 2,
            fallback: 3,
        }
    }
}

impl InteractionPolicy {
    pub fn quality_for(&self, kind: &InteractionKind) -> u8 {
        match kind {
            InteractionKind::Recognized => self.recognized,
            InteractionKind::Seen => self.seen,
            InteractionKind::Pronunciation => self.pronunciation,
            InteractionKind::Hover => self.hover,
            InteractionKind::Explanation => self.explanation,
            InteractionKind::Other(_) => self.fallback,
        }
    }

    fn validate(&self) -> Result<()> {
        let entries = [
            ("recognized", self.recognized),
            ("seen", self.seen),
            ("pronunciation", self.pronunciation),
            ("hover", self.hover),
            ("explanation", self.explanation),
            ("fallback", self.fallback),
        ];
        for (name, value) in entries {
            if value > ReviewQuality::MAX {
                return Err(Error::InvalidConfig(format!(
                    "interaction quality for {name} must be at most {}, got {value}",
                    ReviewQuality::MAX
                )));
            }
        }
        Ok(())
    }
}
