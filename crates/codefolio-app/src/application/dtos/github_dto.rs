use async_graphql::SimpleObject;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use codefolio_domain::contribution::StreakSummary;
use codefolio_domain::stats::{
    GithubGraphs, GithubStatistics, LanguageUsage, PinnedRepository, PrimaryLanguage,
};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "PrimaryLanguage")]
pub struct PrimaryLanguageDto {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "PinnedRepository")]
pub struct PinnedRepositoryDto {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<PrimaryLanguageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "LanguageUsage")]
pub struct LanguageUsageDto {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "GithubStatistics")]
pub struct GithubStatisticsDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "StreakSummary")]
pub struct StreakSummaryDto {
    pub current_streak_length: u32,
    pub current_streak_start: Option<NaiveDate>,
    pub longest_streak_length: u32,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
    pub total_contributions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "GithubGraphs")]
pub struct GithubGraphsDto {
    pub language_graph: Vec<LanguageUsageDto>,
    pub stats_graph: GithubStatisticsDto,
    pub streak_graph: StreakSummaryDto,
}

impl From<PrimaryLanguage> for PrimaryLanguageDto {
    fn from(language: PrimaryLanguage) -> Self {
        Self {
            name: language.name,
            color: language.color,
        }
    }
}

impl From<PinnedRepository> for PinnedRepositoryDto {
    fn from(repo: PinnedRepository) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            url: repo.url,
            stargazer_count: repo.stargazer_count,
            fork_count: repo.fork_count,
            primary_language: repo.primary_language.map(Into::into),
        }
    }
}

impl From<LanguageUsage> for LanguageUsageDto {
    fn from(language: LanguageUsage) -> Self {
        Self {
            name: language.name,
            color: language.color,
            size: language.size,
        }
    }
}

impl From<GithubStatistics> for GithubStatisticsDto {
    fn from(stats: GithubStatistics) -> Self {
        Self {
            followers: stats.followers,
            following: stats.following,
            repos: stats.repos,
            issues: stats.issues,
            commits: stats.commits,
            contributed_to: stats.contributed_to,
            pull_requests: stats.pull_requests,
            pull_request_reviews: stats.pull_request_reviews,
            forked_by: stats.forked_by,
            watched_by: stats.watched_by,
        }
    }
}

impl From<StreakSummary> for StreakSummaryDto {
    fn from(streak: StreakSummary) -> Self {
        Self {
            current_streak_length: streak.current_streak_length,
            current_streak_start: streak.current_streak_start,
            longest_streak_length: streak.longest_streak_length,
            longest_streak_start: streak.longest_streak_start,
            longest_streak_end: streak.longest_streak_end,
            total_contributions: streak.total_contributions,
        }
    }
}

impl From<GithubGraphs> for GithubGraphsDto {
    fn from(graphs: GithubGraphs) -> Self {
        Self {
            language_graph: graphs.language_graph.into_iter().map(Into::into).collect(),
            stats_graph: graphs.stats_graph.into(),
            streak_graph: graphs.streak_graph.into(),
        }
    }
}
