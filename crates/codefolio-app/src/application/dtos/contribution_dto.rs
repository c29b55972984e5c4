use async_graphql::{Enum, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use codefolio_domain::contribution::{
    ContributionDay, ContributionGraph, ProviderFailure, ProviderTotals,
};
use codefolio_domain::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[graphql(name = "Provider")]
pub enum ProviderKind {
    Github,
    Codeforces,
    Leetcode,
}

impl From<Provider> for ProviderKind {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Github => ProviderKind::Github,
            Provider::Codeforces => ProviderKind::Codeforces,
            Provider::Leetcode => ProviderKind::Leetcode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "ContributionDay")]
pub struct ContributionDayDto {
    pub date: NaiveDate,
    pub github_count: u64,
    pub codeforces_count: u64,
    pub leetcode_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "ProviderTotals")]
pub struct ProviderTotalsDto {
    pub github: u64,
    pub codeforces: u64,
    pub leetcode: u64,
}

/// A provider whose data is missing from the graph, and why
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "ProviderFailure")]
pub struct ProviderFailureDto {
    pub provider: ProviderKind,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "ContributionGraph")]
pub struct ContributionGraphDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_contributions: u64,
    pub per_provider_totals: ProviderTotalsDto,
    pub days: Vec<ContributionDayDto>,
    pub failures: Vec<ProviderFailureDto>,
}

impl From<&ContributionDay> for ContributionDayDto {
    fn from(day: &ContributionDay) -> Self {
        Self {
            date: day.date,
            github_count: day.github_count,
            codeforces_count: day.codeforces_count,
            leetcode_count: day.leetcode_count,
        }
    }
}

impl From<ProviderTotals> for ProviderTotalsDto {
    fn from(totals: ProviderTotals) -> Self {
        Self {
            github: totals.github,
            codeforces: totals.codeforces,
            leetcode: totals.leetcode,
        }
    }
}

impl From<ProviderFailure> for ProviderFailureDto {
    fn from(failure: ProviderFailure) -> Self {
        Self {
            provider: failure.provider.into(),
            reason: failure.reason,
        }
    }
}

impl From<ContributionGraph> for ContributionGraphDto {
    fn from(graph: ContributionGraph) -> Self {
        Self {
            start_date: graph.window.start(),
            end_date: graph.window.end(),
            total_contributions: graph.total_contributions,
            per_provider_totals: graph.per_provider_totals.into(),
            days: graph.days.iter().map(ContributionDayDto::from).collect(),
            failures: graph.failures.into_iter().map(Into::into).collect(),
        }
    }
}
