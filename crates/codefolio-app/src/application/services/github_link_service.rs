use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use codefolio_domain::github_link::{GithubAuthorization, GithubAuthorizationRepository};
use codefolio_domain::providers::GithubOAuth;
use codefolio_domain::shared::DomainError;
use codefolio_domain::user::{User, UserRepository};
use codefolio_infrastructure::security::JwtService;

pub const GITHUB_LINKED: &str = "Github account linked successfully";

const INVALID_STATE: &str = "Invalid state";

/// Where the client should send the user to grant access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubAuthorizationStart {
    pub state: String,
    pub url: String,
}

/// GitHub OAuth web flow: hand out a signed `state`, then trade the callback
/// code for a token stored on the user.
pub struct GithubLinkService {
    user_repo: Arc<dyn UserRepository>,
    authorization_repo: Arc<dyn GithubAuthorizationRepository>,
    oauth: Arc<dyn GithubOAuth>,
    state_tokens: Arc<JwtService>,
}

impl GithubLinkService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        authorization_repo: Arc<dyn GithubAuthorizationRepository>,
        oauth: Arc<dyn GithubOAuth>,
        state_tokens: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            authorization_repo,
            oauth,
            state_tokens,
        }
    }

    pub async fn authorize(&self, user: &User) -> Result<GithubAuthorizationStart, DomainError> {
        let now = Utc::now();
        self.authorization_repo
            .delete_created_before(now - GithubAuthorization::ttl())
            .await?;
        self.authorization_repo.delete_for_user(user.id()).await?;

        let state = self.state_tokens.issue(user.id())?;
        self.authorization_repo
            .replace(&GithubAuthorization::start(user.id().clone(), state.clone()))
            .await?;

        Ok(GithubAuthorizationStart {
            url: self.oauth.authorize_url(&state),
            state,
        })
    }

    /// Complete the handshake started by [`authorize`](Self::authorize)
    pub async fn complete(&self, code: &str, state: &str) -> Result<String, DomainError> {
        if code.trim().is_empty() {
            return Err(DomainError::InvalidInput("Missing code".to_string()));
        }
        let user_id = self
            .state_tokens
            .verify(state)
            .map_err(|_| DomainError::InvalidToken(INVALID_STATE.to_string()))?;

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound("User not found".to_string()))?;
        if !user.is_verified() {
            return Err(DomainError::AccountNotVerified(
                "User not verified".to_string(),
            ));
        }

        let pending = self.authorization_repo.find_by_user(&user_id).await?;
        if !pending.is_some_and(|p| p.accepts(state, Utc::now())) {
            return Err(DomainError::InvalidToken(INVALID_STATE.to_string()));
        }

        let token = self.oauth.exchange_code(code).await?;
        user.link_github(token);
        self.user_repo.save(&user).await?;
        self.authorization_repo.delete_for_user(&user_id).await?;

        info!("Linked GitHub account for user {}", user_id);
        Ok(GITHUB_LINKED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        verified_user, InMemoryGithubAuthorizations, InMemoryUsers, StubGithubOAuth,
    };
    use codefolio_domain::shared::ErrorCode;
    use codefolio_domain::Provider;

    struct Harness {
        service: GithubLinkService,
        users: Arc<InMemoryUsers>,
        authorizations: Arc<InMemoryGithubAuthorizations>,
    }

    fn harness() -> Harness {
        let users = Arc::new(InMemoryUsers::new());
        let authorizations = Arc::new(InMemoryGithubAuthorizations::new());
        let state_tokens =
            Arc::new(JwtService::new("state-secret", GithubAuthorization::ttl()).unwrap());
        Harness {
            service: GithubLinkService::new(
                users.clone(),
                authorizations.clone(),
                Arc::new(StubGithubOAuth),
                state_tokens,
            ),
            users,
            authorizations,
        }
    }

    #[tokio::test]
    async fn test_authorize_then_callback_links_token() {
        let h = harness();
        let user = verified_user(&h.users, "Linus", "linus@example.com").await;

        let start = h.service.authorize(&user).await.unwrap();
        assert!(start.url.contains(&start.state));

        let message = h.service.complete("oauth-code", &start.state).await.unwrap();
        assert_eq!(message, GITHUB_LINKED);

        let stored = h.users.find_by_id(user.id()).await.unwrap().unwrap();
        assert!(stored.is_linked(Provider::Github));
        assert_eq!(stored.github_token(), Some("gho_oauth-code"));
        assert!(h.authorizations.find_by_user(user.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_authorization_replaces_previous_state() {
        let h = harness();
        let user = verified_user(&h.users, "Linus", "linus@example.com").await;

        let first = h.service.authorize(&user).await.unwrap();
        let second = h.service.authorize(&user).await.unwrap();
        assert_ne!(first.state, second.state);

        let err = h.service.complete("code", &first.state).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidToken);
        assert!(h.service.complete("code", &second.state).await.is_ok());
    }

    #[tokio::test]
    async fn test_forged_state_is_rejected() {
        let h = harness();
        let err = h.service.complete("code", "not-a-jwt").await.unwrap_err();
        assert_eq!(err.message(), INVALID_STATE);
    }
}
