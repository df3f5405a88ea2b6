//! Outcome counters and derived rate tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::IllusionCategory;
use crate::eval::judge::Outcome;

/// Count of outcomes observed for one tally group.
///
/// Tallies are order-independent counters: they are filled during a single
/// aggregation pass and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<Outcome, u64>,
}

impl Tally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed outcome.
    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Count recorded for one outcome (zero if never observed).
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total observations across all outcomes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// True if no outcome has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Observed outcomes and counts, in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u64)> + '_ {
        self.counts.iter().map(|(outcome, count)| (*outcome, *count))
    }

    /// Merge another tally into this one by summing counts.
    pub fn merge(&mut self, other: &Tally) {
        for (outcome, count) in other.iter() {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
    }

    /// Convert counts to fractions of the tally total.
    ///
    /// An empty tally yields an empty rate table; callers that require
    /// observations should check [`Tally::is_empty`] first.
    #[must_use]
    pub fn rates(&self) -> RateTable {
        let total = self.total();
        RateTable {
            rates: self
                .counts
                .iter()
                .map(|(outcome, count)| (*outcome, *count as f64 / total as f64))
                .collect(),
        }
    }
}

/// Fraction of observations per outcome, derived from a [`Tally`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<Outcome, f64>,
}

impl RateTable {
    /// Rate for one outcome, if it was observed.
    #[must_use]
    pub fn get(&self, outcome: Outcome) -> Option<f64> {
        self.rates.get(&outcome).copied()
    }

    /// True if the source tally had no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Outcomes and rates, in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, f64)> + '_ {
        self.rates.iter().map(|(outcome, rate)| (*outcome, *rate))
    }
}

/// Overall and per-category tallies for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTallies {
    /// Overall outcome counts.
    pub overall: Tally,

    /// Outcome counts per illusion category. All five categories are
    /// present; categories with no pairs stay empty.
    pub per_category: BTreeMap<IllusionCategory, Tally>,
}

impl TaskTallies {
    /// Create empty tallies with every category seeded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overall: Tally::new(),
            per_category: IllusionCategory::all()
                .iter()
                .map(|category| (*category, Tally::new()))
                .collect(),
        }
    }

    /// Record one outcome against the overall tally and `category`'s tally.
    pub fn record(&mut self, category: IllusionCategory, outcome: Outcome) {
        self.overall.record(outcome);
        self.per_category.entry(category).or_default().record(outcome);
    }
}

impl Default for TaskTallies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_record_and_count() {
        let mut tally = Tally::new();
        tally.record(Outcome::Humanlike);
        tally.record(Outcome::Humanlike);
        tally.record(Outcome::Unlike);

        assert_eq!(tally.count(Outcome::Humanlike), 2);
        assert_eq!(tally.count(Outcome::Unlike), 1);
        assert_eq!(tally.count(Outcome::NoIllusion), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_rates_sum_to_one() {
        let mut tally = Tally::new();
        for _ in 0..3 {
            tally.record(Outcome::Humanlike);
        }
        tally.record(Outcome::NoIllusion);

        let rates = tally.rates();
        assert!((rates.get(Outcome::Humanlike).unwrap() - 0.75).abs() < f64::EPSILON);
        assert!((rates.get(Outcome::NoIllusion).unwrap() - 0.25).abs() < f64::EPSILON);
        let sum: f64 = rates.iter().map(|(_, rate)| rate).sum();
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_tally_yields_empty_rates() {
        let tally = Tally::new();
        let rates = tally.rates();
        assert!(rates.is_empty());
        assert_eq!(rates.get(Outcome::Humanlike), None);
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut a = Tally::new();
        a.record(Outcome::Humanlike);
        let mut b = Tally::new();
        b.record(Outcome::Humanlike);
        b.record(Outcome::Unlike);

        a.merge(&b);
        assert_eq!(a.count(Outcome::Humanlike), 2);
        assert_eq!(a.count(Outcome::Unlike), 1);
    }

    #[test]
    fn test_task_tallies_seed_all_categories() {
        let tallies = TaskTallies::new();
        assert_eq!(tallies.per_category.len(), IllusionCategory::all().len());
        assert!(tallies.per_category.values().all(Tally::is_empty));
    }

    #[test]
    fn test_task_tallies_record_hits_both_levels() {
        let mut tallies = TaskTallies::new();
        tallies.record(IllusionCategory::Contrast, Outcome::Humanlike);
        tallies.record(IllusionCategory::Contrast, Outcome::Unlike);
        tallies.record(IllusionCategory::Relativity, Outcome::Humanlike);

        assert_eq!(tallies.overall.total(), 3);
        assert_eq!(
            tallies.per_category[&IllusionCategory::Contrast].total(),
            2
        );
        assert_eq!(
            tallies.per_category[&IllusionCategory::Relativity].total(),
            1
        );
    }

    #[test]
    fn test_tally_serde_uses_labels() {
        let mut tally = Tally::new();
        tally.record(Outcome::NotApplicable);
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"n/a":1}"#);
        let parsed: Tally = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tally);
    }
}
