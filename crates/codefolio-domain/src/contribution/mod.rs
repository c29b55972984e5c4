mod graph;
mod provider;
mod series;
mod streak;

pub use graph::{
    ContributionAggregator, ContributionDay, ContributionGraph, ContributionWindow,
    ProviderFailure, ProviderTotals,
};
pub use provider::Provider;
pub use series::{ActivityEvent, DailyCount, DayCounts, ProviderSeries};
pub use streak::{calculate_streaks, StreakSummary};
