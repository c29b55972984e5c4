use chrono::{NaiveDate, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::dtos::{
    CodeforcesGraphsDto, ContributionGraphDto, GithubGraphsDto, LeetcodeGraphsDto,
    PinnedRepositoryDto,
};
use codefolio_domain::providers::{CodeforcesApi, GithubApi, LeetcodeApi};
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{User, UserRepository};
use codefolio_domain::Provider;

mod contribution;
mod graphs;

/// Provider adapters used by the dashboard
#[derive(Clone)]
pub struct ProviderClients {
    pub github: Arc<dyn GithubApi>,
    pub codeforces: Arc<dyn CodeforcesApi>,
    pub leetcode: Arc<dyn LeetcodeApi>,
}

/// Read-side of the dashboard: the unified contribution calendar and the
/// per-provider statistics. Nothing is cached; every call hits the providers.
pub struct DashboardQueries {
    user_repo: Arc<dyn UserRepository>,
    providers: ProviderClients,
    provider_timeout: Duration,
}

impl DashboardQueries {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        providers: ProviderClients,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            user_repo,
            providers,
            provider_timeout,
        }
    }

    /// 365-day calendar ending today (UTC)
    pub async fn contribution_graph(
        &self,
        user_id: &UserId,
    ) -> Result<ContributionGraphDto, DomainError> {
        self.contribution_graph_on(user_id, Utc::now().date_naive())
            .await
    }

    pub async fn contribution_graph_on(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<ContributionGraphDto, DomainError> {
        let user = self.find_user(user_id).await?;
        let graph =
            contribution::build_graph(&self.providers, &user, self.provider_timeout, today).await;
        Ok(graph.into())
    }

    /// Empty when GitHub is not linked
    pub async fn pinned_repos(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PinnedRepositoryDto>, DomainError> {
        let user = self.find_user(user_id).await?;
        graphs::pinned_repos(self.providers.github.as_ref(), &user, self.provider_timeout).await
    }

    /// `None` when GitHub is not linked
    pub async fn github_graphs(
        &self,
        user_id: &UserId,
    ) -> Result<Option<GithubGraphsDto>, DomainError> {
        let user = self.find_user(user_id).await?;
        graphs::github_graphs(self.providers.github.as_ref(), &user, self.provider_timeout).await
    }

    /// `None` when no Codeforces handle is set
    pub async fn codeforces_graphs(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CodeforcesGraphsDto>, DomainError> {
        let user = self.find_user(user_id).await?;
        graphs::codeforces_graphs(
            self.providers.codeforces.as_ref(),
            &user,
            self.provider_timeout,
        )
        .await
    }

    /// `None` when no LeetCode username is set
    pub async fn leetcode_graphs(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LeetcodeGraphsDto>, DomainError> {
        let user = self.find_user(user_id).await?;
        graphs::leetcode_graphs(self.providers.leetcode.as_ref(), &user, self.provider_timeout)
            .await
    }

    async fn find_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound("Invalid userId".to_string()))
    }
}

/// Bound one provider call; running past `limit` becomes `DomainError::Timeout`
async fn within<T, F>(provider: Provider, limit: Duration, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(limit, fut).await.map_err(|_| {
        DomainError::Timeout(format!(
            "{} did not respond within {}s",
            provider,
            limit.as_secs()
        ))
    })?
}
