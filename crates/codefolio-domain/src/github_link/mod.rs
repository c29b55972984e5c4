use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::shared::{DomainError, UserId};

/// Pending GitHub OAuth handshake for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubAuthorization {
    user_id: UserId,
    state: String,
    created_at: DateTime<Utc>,
}

impl GithubAuthorization {
    pub fn ttl() -> Duration {
        Duration::minutes(10)
    }

    pub fn start(user_id: UserId, state: String) -> Self {
        Self {
            user_id,
            state,
            created_at: Utc::now(),
        }
    }

    pub fn restore(user_id: UserId, state: String, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            state,
            created_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.created_at <= now - Self::ttl()
    }

    /// The callback must present the exact state that was handed out
    pub fn accepts(&self, state: &str, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && self.state == state
    }
}

#[async_trait]
pub trait GithubAuthorizationRepository: Send + Sync {
    /// Store the handshake, replacing any earlier one for the same user
    async fn replace(&self, authorization: &GithubAuthorization) -> Result<(), DomainError>;

    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<GithubAuthorization>, DomainError>;

    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
