use chrono::NaiveDate;
use serde::Deserialize;

use codefolio_domain::contribution::DailyCount;
use codefolio_domain::stats::{
    GithubCalendar, GithubProfileSnapshot, LanguageUsage, PinnedRepository, PrimaryLanguage,
    RepositorySnapshot,
};

#[derive(Debug, Deserialize)]
pub(super) struct RestUser {
    pub login: String,
}

/// `{ "data": ..., "errors": [...] }` envelope of a GraphQL response
#[derive(Debug, Deserialize)]
pub(super) struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserData<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TotalCount {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CalendarUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContributionsCollection {
    pub contribution_calendar: CalendarPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CalendarPayload {
    pub total_contributions: u64,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CalendarDay {
    pub contribution_count: u64,
    pub date: NaiveDate,
}

impl From<CalendarPayload> for GithubCalendar {
    fn from(payload: CalendarPayload) -> Self {
        let days = payload
            .weeks
            .into_iter()
            .flat_map(|week| week.contribution_days)
            .map(|day| DailyCount::new(day.date, day.contribution_count))
            .collect();

        GithubCalendar {
            total_contributions: payload.total_contributions,
            days,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PinnedUser {
    pub pinned_items: PinnedItems,
}

#[derive(Debug, Deserialize)]
pub(super) struct PinnedItems {
    pub nodes: Vec<PinnedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PinnedNode {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<LanguageNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

impl From<PinnedNode> for PinnedRepository {
    fn from(node: PinnedNode) -> Self {
        PinnedRepository {
            name: node.name,
            description: node.description,
            url: node.url,
            stargazer_count: node.stargazer_count,
            fork_count: node.fork_count,
            primary_language: node.primary_language.map(|l| PrimaryLanguage {
                name: l.name,
                color: l.color,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileUser {
    pub followers: TotalCount,
    pub following: TotalCount,
    pub repositories: RepositoryConnection,
    pub issues: TotalCount,
    pub repositories_contributed_to: TotalCount,
    pub pull_requests: PullRequestConnection,
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryConnection {
    pub total_count: u64,
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryNode {
    pub name: String,
    pub fork_count: u64,
    pub watchers: TotalCount,
    pub languages: LanguageConnection,
    pub refs: Option<RefConnection>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LanguageConnection {
    pub edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LanguageEdge {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Debug, Deserialize)]
pub(super) struct RefConnection {
    pub nodes: Vec<RefNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RefNode {
    pub name: String,
    pub target: Option<RefTarget>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RefTarget {
    pub history: Option<TotalCount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestConnection {
    pub total_count: u64,
    pub nodes: Vec<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullRequestNode {
    pub reviews: Option<TotalCount>,
}

impl RepositoryNode {
    /// Commits on `main` or `master`
    fn default_branch_commits(&self) -> u64 {
        self.refs
            .iter()
            .flat_map(|refs| refs.nodes.iter())
            .filter(|r| r.name == "main" || r.name == "master")
            .filter_map(|r| r.target.as_ref()?.history.as_ref())
            .map(|h| h.total_count)
            .sum()
    }
}

impl From<ProfileUser> for GithubProfileSnapshot {
    fn from(user: ProfileUser) -> Self {
        let repositories = user
            .repositories
            .nodes
            .into_iter()
            .map(|repo| RepositorySnapshot {
                default_branch_commits: repo.default_branch_commits(),
                fork_count: repo.fork_count,
                watchers: repo.watchers.total_count,
                languages: repo
                    .languages
                    .edges
                    .into_iter()
                    .map(|edge| LanguageUsage {
                        name: edge.node.name,
                        color: edge.node.color,
                        size: edge.size,
                    })
                    .collect(),
                name: repo.name,
            })
            .collect();

        GithubProfileSnapshot {
            followers: user.followers.total_count,
            following: user.following.total_count,
            total_repositories: user.repositories.total_count,
            issues: user.issues.total_count,
            contributed_to: user.repositories_contributed_to.total_count,
            pull_requests: user.pull_requests.total_count,
            pull_request_reviews: user
                .pull_requests
                .nodes
                .iter()
                .filter_map(|pr| pr.reviews.as_ref())
                .map(|r| r.total_count)
                .sum(),
            repositories,
            calendar: user.contributions_collection.contribution_calendar.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AccessTokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
