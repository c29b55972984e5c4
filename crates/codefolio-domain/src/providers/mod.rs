//! Ports for the third-party services. Adapters translate transport and
//! response-shape failures into `DomainError::ProviderCredential` so callers can
//! degrade one provider without failing the request.

use async_trait::async_trait;

use crate::contest::Contest;
use crate::contribution::ActivityEvent;
use crate::shared::DomainError;
use crate::stats::{
    CodeforcesSubmission, GithubCalendar, GithubProfileSnapshot, LeetcodeGraphs,
    PinnedRepository, RatingChange,
};

#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Login of the account owning `token`
    async fn viewer_login(&self, token: &str) -> Result<String, DomainError>;

    async fn contribution_calendar(
        &self,
        login: &str,
        token: &str,
    ) -> Result<GithubCalendar, DomainError>;

    async fn pinned_repositories(
        &self,
        login: &str,
        token: &str,
    ) -> Result<Vec<PinnedRepository>, DomainError>;

    async fn profile_snapshot(
        &self,
        login: &str,
        token: &str,
    ) -> Result<GithubProfileSnapshot, DomainError>;
}

/// GitHub OAuth web flow
#[async_trait]
pub trait GithubOAuth: Send + Sync {
    fn authorize_url(&self, state: &str) -> String;

    /// Trade the callback `code` for an access token
    async fn exchange_code(&self, code: &str) -> Result<String, DomainError>;
}

#[async_trait]
pub trait CodeforcesApi: Send + Sync {
    async fn submissions(&self, handle: &str) -> Result<Vec<CodeforcesSubmission>, DomainError>;

    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>, DomainError>;
}

#[async_trait]
pub trait LeetcodeApi: Send + Sync {
    /// Submission calendar; each event carries the count LeetCode reports for it
    async fn submission_calendar(&self, username: &str)
        -> Result<Vec<ActivityEvent>, DomainError>;

    async fn graphs(&self, username: &str) -> Result<LeetcodeGraphs, DomainError>;
}

#[async_trait]
pub trait ContestFeed: Send + Sync {
    async fn upcoming_contests(&self) -> Result<Vec<Contest>, DomainError>;
}
