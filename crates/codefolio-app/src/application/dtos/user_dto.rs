use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codefolio_domain::user::User;
use codefolio_domain::Provider;

/// Public profile. The password hash and GitHub token never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "User")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub description: Option<String>,
    pub profile_picture: Option<String>,
    pub codeforces_username: Option<String>,
    pub leetcode_username: Option<String>,
    pub github_linked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().as_str().to_string(),
            is_verified: user.is_verified(),
            description: user.description().map(str::to_string),
            profile_picture: user.profile_picture().map(str::to_string),
            codeforces_username: user.codeforces_username().map(|h| h.as_str().to_string()),
            leetcode_username: user.leetcode_username().map(|h| h.as_str().to_string()),
            github_linked: user.is_linked(Provider::Github),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// The other side of a follow edge or notification
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "UserSummary")]
pub struct UserSummaryDto {
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub description: Option<String>,
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            profile_picture: user.profile_picture().map(str::to_string),
            description: user.description().map(str::to_string),
        }
    }
}

/// `signin` / `checkCode` result
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "AuthPayload")]
pub struct AuthPayloadDto {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "GithubAuthorization")]
pub struct GithubAuthorizationDto {
    pub state: String,
    pub url: String,
}
