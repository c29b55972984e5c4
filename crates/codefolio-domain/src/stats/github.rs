use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::contribution::{calculate_streaks, DailyCount, ProviderSeries, StreakSummary};

/// GitHub's own contribution calendar, oldest day first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubCalendar {
    pub total_contributions: u64,
    pub days: Vec<DailyCount>,
}

impl GithubCalendar {
    pub fn to_series(&self) -> ProviderSeries {
        ProviderSeries::Daily(self.days.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageUsage {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub name: String,
    pub fork_count: u64,
    pub watchers: u64,
    /// Commit count of the `main` or `master` branch
    pub default_branch_commits: u64,
    pub languages: Vec<LanguageUsage>,
}

/// Everything the statistics dashboard needs from one GitHub GraphQL round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubProfileSnapshot {
    pub followers: u64,
    pub following: u64,
    pub total_repositories: u64,
    pub issues: u64,
    pub contributed_to: u64,
    pub pull_requests: u64,
    pub pull_request_reviews: u64,
    pub repositories: Vec<RepositorySnapshot>,
    pub calendar: GithubCalendar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStatistics {
    pub followers: u64,
    pub following: u64,
    pub repos: u64,
    pub issues: u64,
    pub commits: u64,
    pub contributed_to: u64,
    pub pull_requests: u64,
    pub pull_request_reviews: u64,
    pub forked_by: u64,
    pub watched_by: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubGraphs {
    pub language_graph: Vec<LanguageUsage>,
    pub stats_graph: GithubStatistics,
    pub streak_graph: StreakSummary,
}

impl GithubProfileSnapshot {
    pub fn into_graphs(self) -> GithubGraphs {
        let stats_graph = GithubStatistics {
            followers: self.followers,
            following: self.following,
            repos: self.total_repositories,
            issues: self.issues,
            commits: self.repositories.iter().map(|r| r.default_branch_commits).sum(),
            contributed_to: self.contributed_to,
            pull_requests: self.pull_requests,
            pull_request_reviews: self.pull_request_reviews,
            forked_by: self.repositories.iter().map(|r| r.fork_count).sum(),
            watched_by: self.repositories.iter().map(|r| r.watchers).sum(),
        };

        let mut streak_graph = calculate_streaks(&self.calendar.days);
        // GitHub reports its own total, which may cover private contributions
        streak_graph.total_contributions = self.calendar.total_contributions;

        GithubGraphs {
            language_graph: language_graph(&self.repositories),
            stats_graph,
            streak_graph,
        }
    }
}

/// Language sizes summed across repositories, largest first. The first colour
/// reported for a language wins.
fn language_graph(repositories: &[RepositorySnapshot]) -> Vec<LanguageUsage> {
    let mut order: Vec<&str> = Vec::new();
    let mut usage: HashMap<&str, LanguageUsage> = HashMap::new();

    for language in repositories.iter().flat_map(|r| r.languages.iter()) {
        match usage.get_mut(language.name.as_str()) {
            Some(existing) => {
                existing.size += language.size;
                if existing.color.is_none() {
                    existing.color = language.color.clone();
                }
            }
            None => {
                order.push(language.name.as_str());
                usage.insert(language.name.as_str(), language.clone());
            }
        }
    }

    let mut graph: Vec<LanguageUsage> = order
        .into_iter()
        .filter_map(|name| usage.remove(name))
        .collect();
    graph.sort_by(|a, b| b.size.cmp(&a.size));
    graph
}
