use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activity count per UTC calendar date for one provider.
pub type DayCounts = BTreeMap<NaiveDate, u64>;

/// A provider-reported count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

/// A discrete timestamped activity. `weight` is 1 for a single submission and
/// larger when the provider already buckets several submissions under one
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub at: DateTime<Utc>,
    pub weight: u64,
}

impl ActivityEvent {
    pub fn single(at: DateTime<Utc>) -> Self {
        Self { at, weight: 1 }
    }

    pub fn weighted(at: DateTime<Utc>, weight: u64) -> Self {
        Self { at, weight }
    }

    /// UTC date truncation.
    pub fn date(&self) -> NaiveDate {
        self.at.date_naive()
    }
}

/// Raw activity feed as returned by a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSeries {
    Daily(Vec<DailyCount>),
    Events(Vec<ActivityEvent>),
}

impl ProviderSeries {
    /// Collapse the feed into one count per date. Entries landing on the same
    /// date are summed.
    pub fn into_day_counts(self) -> DayCounts {
        let mut counts = DayCounts::new();
        match self {
            ProviderSeries::Daily(days) => {
                for day in days {
                    *counts.entry(day.date).or_insert(0) += day.count;
                }
            }
            ProviderSeries::Events(events) => {
                for event in events {
                    *counts.entry(event.date()).or_insert(0) += event.weight;
                }
            }
        }
        counts.retain(|_, count| *count > 0);
        counts
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ProviderSeries::Daily(days) => days.is_empty(),
            ProviderSeries::Events(events) => events.is_empty(),
        }
    }
}
