use crate::config::SchedulerConfig;
use crate::models::{
    DueItem, InteractionKind, ItemId, LanguageStats, ProgressMap, ProgressRecord, ReviewQuality, ReviewStats, Timestamp,
};
use crate::shuffle::shuffle;
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use log::{debug, warn};
use rand::Rng;
use std::collections::{HashMap, HashSet};

const ACCURACY_WEIGHT: f64 = 0.4;
const SPACING_WEIGHT: f64 = 0.3;
const STREAK_WEIGHT: f64 = 0.3;
const SPACING_HORIZON_DAYS: f64 = 30.0;
const STREAK_HORIZON: f64 = 5.0;

/// Mastery score in [0, 100] blending accuracy, spacing and streak length.
pub fn compute_mastery(record: &ProgressRecord) -> u8 {
    if record.total_seen == 0 {
        return 0;
    }

    let accuracy = f64::from(record.correct_count) / f64::from(record.total_seen);
    let spacing = (f64::from(record.interval) / SPACING_HORIZON_DAYS).min(1.0);
    let streak = (f64::from(record.repetitions) / STREAK_HORIZON).min(1.0);
    let blend = ACCURACY_WEIGHT * accuracy + SPACING_WEIGHT * spacing + STREAK_WEIGHT * streak;

    (100.0 * blend.clamp(0.0, 1.0)).round() as u8
}

/// SM-2 spaced repetition scheduler. Holds only its tuning values; every
/// operation works on the progress the caller passes in.
#[derive(Debug, Clone, Default)]
pub struct SpacedRepetition {
    config: SchedulerConfig,
}

impl SpacedRepetition {
    pub fn new(config: SchedulerConfig) -> Self {
        SpacedRepetition { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Apply one review to `record` (or to a fresh record when the item has
    /// never been reviewed) and return the updated copy.
    pub fn record_review(
        &self,
        item: &ItemId,
        record: Option<&ProgressRecord>,
        quality: ReviewQuality,
        now: Timestamp,
    ) -> ProgressRecord {
        let mut updated = match record {
            Some(existing) => existing.clone(),
            None => ProgressRecord::new(item.clone(), self.config.default_ease, now),
        };
        if updated.item != *item {
            // The result is stored under `item`, so it has to carry that key
            warn!("Reviewing {} with the record of {}", item, updated.item);
            updated.item = item.clone();
        }

        updated.total_seen = updated.total_seen.saturating_add(1);
        updated.last_seen = now;

        let miss = f64::from(ReviewQuality::MAX - quality.value());
        let ease_delta = 0.1 - miss * (0.08 + miss * 0.02);
        updated.ease_factor = (updated.ease_factor + ease_delta).max(self.config.min_ease);

        if quality.is_success() {
            updated.correct_count = updated.correct_count.saturating_add(1);
            updated.interval = self.next_interval(&updated);
            updated.repetitions = updated.repetitions.saturating_add(1);
        } else {
            // Lapse: restart the streak, keep the lowered ease
            updated.repetitions = 0;
            updated.interval = self.config.lapse_interval;
        }

        updated.next_review = now.plus_days(updated.interval);
        updated.mastery = compute_mastery(&updated);

        debug!(
            "Reviewed {} with quality {}: interval={}d ease={:.2} reps={} mastery={}",
            item,
            quality.value(),
            updated.interval,
            updated.ease_factor,
            updated.repetitions,
            updated.mastery
        );

        updated
    }

    /// Interval after a successful review. Walks the ladder first, then grows
    /// by the (already updated) ease factor.
    fn next_interval(&self, record: &ProgressRecord) -> u32 {
        let interval = match self.config.interval_ladder.get(record.repetitions as usize) {
            Some(&rung) => rung,
            None => (f64::from(record.interval) * record.ease_factor).round() as u32,
        };
        interval.max(1).min(self.config.max_interval.max(1))
    }

    pub fn compute_mastery(&self, record: &ProgressRecord) -> u8 {
        compute_mastery(record)
    }

    /// Items whose review time has passed, most overdue first, at most `limit`.
    /// Equal overdue amounts keep the map's iteration order.
    pub fn due_for_review(&self, progress: &ProgressMap, now: Timestamp, limit: usize) -> Vec<DueItem> {
        let mut due: Vec<DueItem> = progress
            .iter()
            .filter(|(_, record)| record.is_due(now))
            .map(|(id, record)| DueItem {
                item: id.clone(),
                overdue_ms: now.millis_since(record.next_review),
            })
            .collect();

        due.sort_by(|a, b| b.overdue_ms.cmp(&a.overdue_ms));
        due.truncate(limit);
        due
    }

    /// Up to `limit` never-reviewed candidates in random order.
    pub fn select_new_items<R: Rng + ?Sized>(
        &self,
        progress: &ProgressMap,
        candidates: &[ItemId],
        limit: usize,
        rng: &mut R,
    ) -> Vec<ItemId> {
        let mut seen = HashSet::new();
        let mut fresh: Vec<ItemId> = candidates
            .iter()
            .filter(|id| !progress.contains_key(*id) && seen.insert(*id))
            .cloned()
            .collect();

        shuffle(&mut fresh, rng);
        fresh.truncate(limit);
        fresh
    }

    /// Words to annotate on a page: due reviews that are visible (most overdue
    /// first, at most `review_slots`), then new words filling the rest of the budget.
    pub fn select_for_presentation<R: Rng + ?Sized>(
        &self,
        progress: &ProgressMap,
        visible: &[ItemId],
        budget: usize,
        now: Timestamp,
        rng: &mut R,
    ) -> Vec<ItemId> {
        let visible_set: HashSet<&ItemId> = visible.iter().collect();
        let review_budget = self.config.review_slots.min(budget);

        let mut selected: Vec<ItemId> = self
            .due_for_review(progress, now, progress.len())
            .into_iter()
            .filter(|due| visible_set.contains(&due.item))
            .take(review_budget)
            .map(|due| due.item)
            .collect();

        let chosen: HashSet<ItemId> = selected.iter().cloned().collect();
        let remaining: Vec<ItemId> = visible.iter().filter(|id| !chosen.contains(*id)).cloned().collect();
        let new_items = self.select_new_items(progress, &remaining, budget - selected.len(), rng);

        debug!(
            "Selected {} review and {} new items from {} visible (budget {})",
            selected.len(),
            new_items.len(),
            visible.len(),
            budget
        );

        selected.extend(new_items);
        selected
    }

    pub fn classify_interaction(&self, kind: &InteractionKind) -> ReviewQuality {
        ReviewQuality::saturating(self.config.interactions.quality_for(kind))
    }

    /// Statistics with "today" measured from local midnight.
    pub fn aggregate_statistics(&self, progress: &ProgressMap, now: Timestamp) -> ReviewStats {
        self.aggregate_statistics_in(progress, now, &Local)
    }

    pub fn aggregate_statistics_in<Tz: TimeZone>(&self, progress: &ProgressMap, now: Timestamp, tz: &Tz) -> ReviewStats {
        let midnight = start_of_day(now, tz);
        let threshold = self.config.mastered_threshold;

        let total_words = progress.len();
        let mastered = progress.values().filter(|r| r.mastery >= threshold).count();
        let in_progress = progress
            .values()
            .filter(|r| r.mastery > 0 && r.mastery < threshold)
            .count();
        let due = progress.values().filter(|r| r.is_due(now)).count();
        let reviewed_today = progress
            .values()
            .filter(|r| r.total_seen > 0 && r.last_seen >= midnight)
            .count();

        ReviewStats {
            total_words,
            mastered,
            in_progress,
            due,
            average_mastery: mean_mastery(progress.values()),
            reviewed_today,
        }
    }

    pub fn language_statistics(&self, progress: &ProgressMap, now: Timestamp) -> Vec<LanguageStats> {
        let mut language_map: HashMap<&str, Vec<&ProgressRecord>> = HashMap::new();

        for (id, record) in progress {
            language_map.entry(id.language()).or_default().push(record);
        }

        let mut stats: Vec<LanguageStats> = language_map
            .into_iter()
            .map(|(language, records)| LanguageStats {
                language: language.to_string(),
                total_words: records.len(),
                due: records.iter().filter(|r| r.is_due(now)).count(),
                mastered: records
                    .iter()
                    .filter(|r| r.mastery >= self.config.mastered_threshold)
                    .count(),
                average_mastery: mean_mastery(records.iter().copied()),
            })
            .collect();

        stats.sort_by(|a, b| a.language.cmp(&b.language));
        stats
    }
}

/// Mean mastery rounded to one decimal, 0 for no records.
fn mean_mastery<'a>(records: impl Iterator<Item = &'a ProgressRecord>) -> f64 {
    let (count, sum) = records.fold((0usize, 0u64), |(count, sum), r| (count + 1, sum + u64::from(r.mastery)));
    if count == 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 * 10.0).round() / 10.0
}

fn start_of_day<Tz: TimeZone>(now: Timestamp, tz: &Tz) -> Timestamp {
    let Some(utc) = now.to_datetime() else {
        return now;
    };
    let today = utc.with_timezone(tz).date_naive();
    let midnight = first_valid_hour(today, |naive| tz.from_local_datetime(&naive).earliest());

    match midnight {
        Some(start) => Timestamp::from_millis(start.timestamp_millis()).unwrap_or(Timestamp::EPOCH),
        None => now,
    }
}

/// The first whole local hour of `date` that exists. Some zones skip
/// midnight when daylight saving starts.
fn first_valid_hour<T>(date: NaiveDate, resolve: impl FnMut(NaiveDateTime) -> Option<T>) -> Option<T> {
    (0..24).filter_map(|hour| date.and_hms_opt(hour, 0, 0)).find_map(resolve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MS_PER_DAY;
    use chrono::{FixedOffset, Timelike, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn id(word: &str) -> ItemId {
        ItemId::new(word, "fr").unwrap()
    }

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn quality(value: u8) -> ReviewQuality {
        ReviewQuality::from_u8(value).unwrap()
    }

    // A record that was scheduled for `next_review` with the given mastery inputs.
    fn scheduled(word: &str, next_review: i64) -> ProgressRecord {
        let mut record = ProgressRecord::new(id(word), 2.5, ts(next_review));
        record.total_seen = 1;
        record.correct_count = 1;
        record.mastery = compute_mastery(&record);
        record
    }

    fn progress_of(records: Vec<ProgressRecord>) -> ProgressMap {
        records.into_iter().map(|r| (r.item.clone(), r)).collect()
    }

    #[test]
    fn test_first_review_perfect() {
        let sr = SpacedRepetition::default();
        let now = ts(1_700_000_000_000);
        let record = sr.record_review(&id("chat"), None, quality(5), now);

        assert_eq!(record.interval, 1);
        assert_eq!(record.repetitions, 1);
        assert!(record.ease_factor > 2.5);
        assert_eq!(record.last_seen, now);
        assert_eq!(record.next_review.as_millis(), now.as_millis() + MS_PER_DAY);
        assert_eq!(record.total_seen, 1);
        assert_eq!(record.correct_count, 1);
        assert_eq!(record.mastery, 47);
    }

    #[test]
    fn test_second_and_third_reviews_perfect() {
        let sr = SpacedRepetition::default();
        let item = id("chat");
        let first = sr.record_review(&item, None, quality(5), ts(0));
        let second = sr.record_review(&item, Some(&first), quality(5), ts(MS_PER_DAY));

        assert_eq!(second.interval, 3);
        assert_eq!(second.repetitions, 2);

        let third = sr.record_review(&item, Some(&second), quality(5), ts(4 * MS_PER_DAY));
        assert_eq!(third.interval, (3.0 * third.ease_factor).round() as u32);
        assert_eq!(third.interval, 8);
        assert_eq!(third.repetitions, 3);
    }

    #[test]
    fn test_failed_review_resets_streak() {
        let sr = SpacedRepetition::default();
        let mut record = ProgressRecord::new(id("chien"), 2.0, ts(0));
        record.repetitions = 4;
        record.interval = 30;
        record.total_seen = 4;
        record.correct_count = 4;

        let updated = sr.record_review(&record.item.clone(), Some(&record), quality(1), ts(MS_PER_DAY));
        assert_eq!(updated.repetitions, 0);
        assert_eq!(updated.interval, 1);
        assert!(updated.ease_factor < 2.0);
        assert!(updated.ease_factor >= 1.3);
        assert_eq!(updated.correct_count, 4);
        assert_eq!(updated.total_seen, 5);
    }

    #[test]
    fn test_review_keeps_requested_item() {
        let sr = SpacedRepetition::default();
        let other = sr.record_review(&id("chat"), None, quality(4), ts(0));

        let updated = sr.record_review(&id("chien"), Some(&other), quality(4), ts(MS_PER_DAY));
        assert_eq!(updated.item, id("chien"));
        assert!(updated.validate(sr.config()).is_ok());
    }

    #[test]
    fn test_quality_four_keeps_ease() {
        let sr = SpacedRepetition::default();
        let record = sr.record_review(&id("pain"), None, quality(4), ts(0));
        assert!((record.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_ease_floor_under_repeated_failure() {
        let sr = SpacedRepetition::default();
        let item = id("oiseau");
        let mut record = sr.record_review(&item, None, quality(0), ts(0));
        for day in 1..20 {
            record = sr.record_review(&item, Some(&record), quality(0), ts(day * MS_PER_DAY));
        }
        assert_eq!(record.ease_factor, 1.3);
        assert_eq!(record.interval, 1);
    }

    #[test]
    fn test_updated_record_passes_validation() {
        let sr = SpacedRepetition::default();
        let item = id("maison");
        let mut record = sr.record_review(&item, None, quality(3), ts(0));
        for (day, q) in [5u8, 2, 4, 4, 5].into_iter().enumerate() {
            record = sr.record_review(&item, Some(&record), quality(q), ts(day as i64 * MS_PER_DAY));
            assert!(record.validate(sr.config()).is_ok());
        }
    }

    #[test]
    fn test_interval_capped() {
        let config = SchedulerConfig {
            max_interval: 10,
            ..SchedulerConfig::default()
        };
        let sr = SpacedRepetition::new(config);
        let item = id("arbre");
        let mut record = sr.record_review(&item, None, quality(5), ts(0));
        for _ in 0..10 {
            record = sr.record_review(&item, Some(&record), quality(5), ts(0));
        }
        assert_eq!(record.interval, 10);
    }

    #[test]
    fn test_custom_ladder() {
        let config = SchedulerConfig {
            interval_ladder: vec![2, 4, 7],
            ..SchedulerConfig::default()
        };
        let sr = SpacedRepetition::new(config);
        let item = id("lune");
        let intervals: Vec<u32> = (0..3)
            .scan(None, |prev: &mut Option<ProgressRecord>, _| {
                let next = sr.record_review(&item, prev.as_ref(), quality(4), ts(0));
                *prev = Some(next.clone());
                Some(next.interval)
            })
            .collect();
        assert_eq!(intervals, vec![2, 4, 7]);
    }

    #[test]
    fn test_mastery_idempotent_and_bounded() {
        let mut record = scheduled("soleil", 0);
        record.total_seen = 10;
        record.correct_count = 10;
        record.interval = 90;
        record.repetitions = 12;

        let first = compute_mastery(&record);
        assert_eq!(first, compute_mastery(&record));
        assert_eq!(first, 100);

        record.total_seen = 0;
        record.correct_count = 0;
        assert_eq!(compute_mastery(&record), 0);
    }

    #[test]
    fn test_due_for_review_orders_by_overdue() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![
            scheduled("un", 900),
            scheduled("deux", 100),
            scheduled("trois", 2_000),
            scheduled("quatre", 500),
        ]);

        let due = sr.due_for_review(&progress, ts(1_000), 10);
        let words: Vec<&str> = due.iter().map(|d| d.item.word()).collect();
        assert_eq!(words, vec!["deux", "quatre", "un"]);
        assert_eq!(due[0].overdue_ms, 900);

        let limited = sr.due_for_review(&progress, ts(1_000), 1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].item.word(), "deux");
    }

    #[test]
    fn test_due_for_review_ties_keep_input_order() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![scheduled("b", 100), scheduled("a", 100), scheduled("c", 100)]);
        let due = sr.due_for_review(&progress, ts(100), 10);
        let words: Vec<&str> = due.iter().map(|d| d.item.word()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
        assert!(due.iter().all(|d| d.overdue_ms == 0));
    }

    #[test]
    fn test_select_new_items_skips_tracked() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![scheduled("vieux", 0)]);
        let candidates = vec![id("vieux"), id("neuf"), id("neuf"), id("autre")];
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let picked = sr.select_new_items(&progress, &candidates, 10, &mut rng);
        assert_eq!(picked.len(), 2);
        assert!(!picked.contains(&id("vieux")));
        assert!(picked.contains(&id("neuf")));
        assert!(picked.contains(&id("autre")));

        let one = sr.select_new_items(&progress, &candidates, 1, &mut rng);
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_select_new_items_reaches_every_permutation() {
        let sr = SpacedRepetition::default();
        let progress = ProgressMap::new();
        let pool = vec![id("a"), id("b"), id("c")];

        let orderings: HashSet<Vec<ItemId>> = (0..300)
            .map(|seed| sr.select_new_items(&progress, &pool, 3, &mut ChaCha8Rng::seed_from_u64(seed)))
            .collect();
        assert_eq!(orderings.len(), 6);
    }

    #[test]
    fn test_select_for_presentation_reviews_first() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![
            scheduled("r1", 400),
            scheduled("r2", 100),
            scheduled("r3", 300),
            scheduled("r4", 200),
            scheduled("hidden", 0),
            scheduled("later", 5_000),
        ]);
        let visible = vec![
            id("n1"),
            id("r1"),
            id("later"),
            id("r2"),
            id("n2"),
            id("r3"),
            id("r4"),
            id("n3"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let picked = sr.select_for_presentation(&progress, &visible, 5, ts(1_000), &mut rng);
        assert_eq!(picked.len(), 5);
        assert_eq!(&picked[..3], &[id("r2"), id("r4"), id("r3")]);
        for new_item in &picked[3..] {
            assert!([id("n1"), id("n2"), id("n3")].contains(new_item));
        }
        assert!(!picked.contains(&id("hidden")));
        assert!(!picked.contains(&id("later")));
    }

    #[test]
    fn test_select_for_presentation_small_budget() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![scheduled("r1", 0), scheduled("r2", 0)]);
        let visible = vec![id("r1"), id("r2"), id("n1")];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let picked = sr.select_for_presentation(&progress, &visible, 1, ts(10), &mut rng);
        assert_eq!(picked, vec![id("r1")]);

        let none = sr.select_for_presentation(&progress, &visible, 0, ts(10), &mut rng);
        assert!(none.is_empty());
    }

    #[test]
    fn test_select_for_presentation_no_duplicates() {
        let sr = SpacedRepetition::default();
        let progress = progress_of(vec![scheduled("r1", 0)]);
        let visible = vec![id("r1"), id("r1"), id("n1"), id("n1")];
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let picked = sr.select_for_presentation(&progress, &visible, 10, ts(10), &mut rng);
        assert_eq!(picked, vec![id("r1"), id("n1")]);
    }

    #[test]
    fn test_classify_interaction() {
        let sr = SpacedRepetition::default();
        assert_eq!(sr.classify_interaction(&InteractionKind::Recognized).value(), 5);
        assert_eq!(sr.classify_interaction(&InteractionKind::Seen).value(), 4);
        assert_eq!(sr.classify_interaction(&InteractionKind::Hover).value(), 2);
        assert_eq!(sr.classify_interaction(&InteractionKind::Explanation).value(), 2);
        assert_eq!(sr.classify_interaction(&InteractionKind::Pronunciation).value(), 3);
        assert_eq!(sr.classify_interaction(&InteractionKind::from("shrug")).value(), 3);
    }

    #[test]
    fn test_stats_empty() {
        let sr = SpacedRepetition::default();
        let stats = sr.aggregate_statistics(&ProgressMap::new(), ts(0));
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.average_mastery, 0.0);
        assert_eq!(stats.mastered, 0);
        assert_eq!(stats.due, 0);
        assert_eq!(stats.reviewed_today, 0);
    }

    #[test]
    fn test_stats_counts() {
        let sr = SpacedRepetition::default();
        // 2024-03-10 15:00 UTC
        let now = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()).unwrap();
        let yesterday = ts(now.as_millis() - MS_PER_DAY);

        let mut strong = scheduled("fort", now.as_millis() + 10 * MS_PER_DAY);
        strong.mastery = 90;
        strong.last_seen = now;
        let mut learning = scheduled("moyen", now.as_millis() - 1);
        learning.mastery = 40;
        learning.last_seen = yesterday;
        let mut untouched = scheduled("zero", now.as_millis());
        untouched.mastery = 0;
        untouched.last_seen = yesterday;

        let progress = progress_of(vec![strong, learning, untouched]);
        let stats = sr.aggregate_statistics_in(&progress, now, &Utc);

        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.due, 2);
        assert_eq!(stats.average_mastery, 43.3);
        assert_eq!(stats.reviewed_today, 1);
    }

    #[test]
    fn test_reviewed_today_uses_local_midnight() {
        let sr = SpacedRepetition::default();
        // 01:00 at UTC+2 is 23:00 UTC of the previous day
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 9, 23, 0, 0).unwrap()).unwrap();

        let mut before_midnight = scheduled("avant", 0);
        before_midnight.last_seen = ts(now.as_millis() - 2 * 3600 * 1000);
        let mut after_midnight = scheduled("apres", 0);
        after_midnight.last_seen = ts(now.as_millis() - 30 * 60 * 1000);

        let progress = progress_of(vec![before_midnight, after_midnight]);
        assert_eq!(sr.aggregate_statistics_in(&progress, now, &tz).reviewed_today, 1);
        assert_eq!(sr.aggregate_statistics_in(&progress, now, &Utc).reviewed_today, 2);
    }

    #[test]
    fn test_day_start_skips_missing_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let start = first_valid_hour(date, |naive| if naive.hour() == 0 { None } else { Some(naive) });
        assert_eq!(start, date.and_hms_opt(1, 0, 0));

        let normal = first_valid_hour(date, Some);
        assert_eq!(normal, date.and_hms_opt(0, 0, 0));
    }

    #[test]
    fn test_language_statistics() {
        let sr = SpacedRepetition::default();
        let mut german = ProgressRecord::new(ItemId::new("hund", "de").unwrap(), 2.5, ts(5_000));
        german.mastery = 85;
        let mut french = scheduled("chat", 0);
        french.mastery = 20;
        let mut french_two = scheduled("chien", 0);
        french_two.mastery = 30;

        let progress = progress_of(vec![french, german, french_two]);
        let stats = sr.language_statistics(&progress, ts(1_000));

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].language, "de");
        assert_eq!(stats[0].total_words, 1);
        assert_eq!(stats[0].due, 0);
        assert_eq!(stats[0].mastered, 1);
        assert_eq!(stats[1].language, "fr");
        assert_eq!(stats[1].total_words, 2);
        assert_eq!(stats[1].due, 2);
        assert_eq!(stats[1].average_mastery, 25.0);
    }
}
