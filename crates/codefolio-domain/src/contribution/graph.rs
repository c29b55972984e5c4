use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use super::provider::Provider;
use super::series::DayCounts;

/// The trailing 365-day window `[today - 364, today]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ContributionWindow {
    pub const DAYS: usize = 365;

    pub fn ending_on(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(Self::DAYS as i64 - 1),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Bucket offset of `date`, or `None` outside the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(Self::DAYS)
    }
}

/// One bucket of the unified calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub github_count: u64,
    pub codeforces_count: u64,
    pub leetcode_count: u64,
}

impl ContributionDay {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            github_count: 0,
            codeforces_count: 0,
            leetcode_count: 0,
        }
    }

    pub fn count(&self, provider: Provider) -> u64 {
        match provider {
            Provider::Github => self.github_count,
            Provider::Codeforces => self.codeforces_count,
            Provider::Leetcode => self.leetcode_count,
        }
    }

    pub fn total(&self) -> u64 {
        self.github_count + self.codeforces_count + self.leetcode_count
    }

    fn add(&mut self, provider: Provider, amount: u64) {
        match provider {
            Provider::Github => self.github_count += amount,
            Provider::Codeforces => self.codeforces_count += amount,
            Provider::Leetcode => self.leetcode_count += amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTotals {
    pub github: u64,
    pub codeforces: u64,
    pub leetcode: u64,
}

impl ProviderTotals {
    pub fn get(&self, provider: Provider) -> u64 {
        match provider {
            Provider::Github => self.github,
            Provider::Codeforces => self.codeforces,
            Provider::Leetcode => self.leetcode,
        }
    }

    pub fn sum(&self) -> u64 {
        self.github + self.codeforces + self.leetcode
    }

    fn add(&mut self, provider: Provider, amount: u64) {
        match provider {
            Provider::Github => self.github += amount,
            Provider::Codeforces => self.codeforces += amount,
            Provider::Leetcode => self.leetcode += amount,
        }
    }
}

/// A provider whose feed could not be merged. Its counts stay at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: Provider,
    pub reason: String,
}

/// Unified 365-day activity calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionGraph {
    pub window: ContributionWindow,
    pub days: Vec<ContributionDay>,
    pub per_provider_totals: ProviderTotals,
    pub total_contributions: u64,
    pub failures: Vec<ProviderFailure>,
}

impl ContributionGraph {
    pub fn day(&self, date: NaiveDate) -> Option<&ContributionDay> {
        self.window.index_of(date).and_then(|idx| self.days.get(idx))
    }

    pub fn has_failure(&self, provider: Provider) -> bool {
        self.failures.iter().any(|f| f.provider == provider)
    }
}

/// Single-threaded reducer folding per-provider day maps into the unified
/// bucket array. Each provider only touches its own counter in a bucket.
#[derive(Debug)]
pub struct ContributionAggregator {
    window: ContributionWindow,
    days: Vec<ContributionDay>,
    totals: ProviderTotals,
    failures: Vec<ProviderFailure>,
}

impl ContributionAggregator {
    pub fn new(window: ContributionWindow) -> Self {
        Self {
            window,
            days: window.dates().map(ContributionDay::empty).collect(),
            totals: ProviderTotals::default(),
            failures: Vec::new(),
        }
    }

    pub fn window(&self) -> ContributionWindow {
        self.window
    }

    /// Merge one provider's counts. Dates outside the window are skipped.
    pub fn merge(&mut self, provider: Provider, counts: &DayCounts) -> &mut Self {
        let mut merged = 0usize;
        for (date, count) in counts.range(self.window.start..=self.window.end) {
            if let Some(idx) = self.window.index_of(*date) {
                self.days[idx].add(provider, *count);
                self.totals.add(provider, *count);
                merged += 1;
            }
        }

        let skipped = counts.len() - merged;
        if skipped > 0 {
            debug!(
                "[contribution] provider={} skipped {} out-of-window days",
                provider.as_str(),
                skipped
            );
        }
        self
    }

    pub fn record_failure(&mut self, provider: Provider, reason: impl Into<String>) -> &mut Self {
        self.failures.push(ProviderFailure {
            provider,
            reason: reason.into(),
        });
        self
    }

    pub fn finish(self) -> ContributionGraph {
        let total_contributions = self.totals.sum();
        ContributionGraph {
            window: self.window,
            days: self.days,
            per_provider_totals: self.totals,
            total_contributions,
            failures: self.failures,
        }
    }
}
