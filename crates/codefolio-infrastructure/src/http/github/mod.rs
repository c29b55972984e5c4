mod queries;
mod types;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use super::{provider_error, rejected, HttpClient};
use codefolio_domain::providers::{GithubApi, GithubOAuth};
use codefolio_domain::shared::DomainError;
use codefolio_domain::stats::{GithubCalendar, GithubProfileSnapshot, PinnedRepository};
use codefolio_domain::Provider;
use types::{
    AccessTokenResponse, CalendarUser, GraphqlResponse, PinnedUser, ProfileUser, RestUser,
    UserData,
};

const API_BASE: &str = "https://api.github.com";
const OAUTH_BASE: &str = "https://github.com";

#[derive(Debug, Clone)]
pub struct GithubOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// GitHub REST, GraphQL and OAuth endpoints.
pub struct GithubClient {
    http: HttpClient,
    oauth: GithubOAuthConfig,
    api_base: String,
    oauth_base: String,
}

impl GithubClient {
    pub fn new(http: HttpClient, oauth: GithubOAuthConfig) -> Self {
        Self {
            http,
            oauth,
            api_base: API_BASE.to_string(),
            oauth_base: OAUTH_BASE.to_string(),
        }
    }

    /// Point the client at another host (GitHub Enterprise)
    pub fn with_base_urls(mut self, api_base: &str, oauth_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self.oauth_base = oauth_base.trim_end_matches('/').to_string();
        self
    }

    async fn graphql<T>(
        &self,
        operation: &str,
        query: &'static str,
        login: &str,
        token: &str,
    ) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let url = format!("{}/graphql", self.api_base);
        let body = json!({ "query": query, "variables": { "userName": login } });

        let response: GraphqlResponse<UserData<T>> = self
            .http
            .send_json(operation, |client| {
                client.post(&url).bearer_auth(token).json(&body)
            })
            .await
            .map_err(|e| provider_error(Provider::Github, e))?;

        if let Some(error) = response.errors.first() {
            return Err(DomainError::ProviderCredential {
                provider: Provider::Github,
                message: error.message.clone(),
            });
        }

        response
            .data
            .and_then(|data| data.user)
            .ok_or_else(|| DomainError::ProviderCredential {
                provider: Provider::Github,
                message: format!("Could not resolve to a user with the login of '{}'", login),
            })
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn viewer_login(&self, token: &str) -> Result<String, DomainError> {
        let url = format!("{}/user", self.api_base);

        let user: RestUser = self
            .http
            .send_json("GitHub viewer", |client| {
                client
                    .get(&url)
                    .header(header::AUTHORIZATION, format!("token {}", token))
            })
            .await
            .map_err(|e| provider_error(Provider::Github, e))?;

        debug!("GitHub token resolved to {}", user.login);
        Ok(user.login)
    }

    async fn contribution_calendar(
        &self,
        login: &str,
        token: &str,
    ) -> Result<GithubCalendar, DomainError> {
        let user: CalendarUser = self
            .graphql(
                "GitHub contribution calendar",
                queries::CONTRIBUTION_CALENDAR,
                login,
                token,
            )
            .await?;

        Ok(user.contributions_collection.contribution_calendar.into())
    }

    async fn pinned_repositories(
        &self,
        login: &str,
        token: &str,
    ) -> Result<Vec<PinnedRepository>, DomainError> {
        let user: PinnedUser = self
            .graphql(
                "GitHub pinned repositories",
                queries::PINNED_REPOSITORIES,
                login,
                token,
            )
            .await?;

        Ok(user.pinned_items.nodes.into_iter().map(Into::into).collect())
    }

    async fn profile_snapshot(
        &self,
        login: &str,
        token: &str,
    ) -> Result<GithubProfileSnapshot, DomainError> {
        let user: ProfileUser = self
            .graphql("GitHub profile", queries::PROFILE_SNAPSHOT, login, token)
            .await?;

        Ok(user.into())
    }
}

#[async_trait]
impl GithubOAuth for GithubClient {
    fn authorize_url(&self, state: &str) -> String {
        let base = format!("{}/login/oauth/authorize", self.oauth_base);
        match Url::parse_with_params(
            &base,
            &[("client_id", self.oauth.client_id.as_str()), ("state", state)],
        ) {
            Ok(url) => url.into(),
            Err(_) => format!("{}?client_id={}", base, self.oauth.client_id),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<String, DomainError> {
        let url = format!("{}/login/oauth/access_token", self.oauth_base);
        let body = json!({
            "client_id": self.oauth.client_id,
            "client_secret": self.oauth.client_secret,
            "code": code,
        });

        let response: AccessTokenResponse = self
            .http
            .execute_with_retry("GitHub OAuth exchange", || {
                let request = self
                    .http
                    .inner()
                    .post(&url)
                    .header(header::ACCEPT, "application/json")
                    .json(&body);
                async move {
                    let response = request
                        .send()
                        .await
                        .context("Failed to reach GitHub")?
                        .error_for_status()?;
                    let payload: AccessTokenResponse = response.json().await?;
                    if payload.access_token.is_none() {
                        let message = payload
                            .error_description
                            .or(payload.error)
                            .unwrap_or_else(|| "no access token returned".to_string());
                        return Err(rejected(Provider::Github, message));
                    }
                    Ok(payload)
                }
            })
            .await
            .map_err(|e| provider_error(Provider::Github, e))?;

        info!("GitHub OAuth code exchanged");
        response.access_token.ok_or_else(|| DomainError::ProviderCredential {
            provider: Provider::Github,
            message: "no access token returned".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RetryConfig;
    use std::time::Duration;

    fn client() -> GithubClient {
        let http = HttpClient::with_config(RetryConfig::for_providers(), Duration::from_secs(1))
            .unwrap();
        GithubClient::new(
            http,
            GithubOAuthConfig {
                client_id: "Iv1.abc".into(),
                client_secret: "shh".into(),
            },
        )
    }

    #[test]
    fn test_authorize_url_encodes_state() {
        let url = client().authorize_url("a.b+c/d=");
        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=Iv1.abc"));
        assert!(url.contains("state=a.b%2Bc%2Fd%3D"));
    }

    #[test]
    fn test_base_urls_are_trimmed() {
        let client = client().with_base_urls("http://localhost:9000/api/", "http://localhost:9000/");
        assert!(client
            .authorize_url("s")
            .starts_with("http://localhost:9000/login/oauth/authorize"));
    }
}
