use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::security::EncryptionService;
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{Email, ProviderHandle, User};

#[derive(FromRow)]
pub(super) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub description: Option<String>,
    pub profile_picture: Option<String>,
    pub profile_picture_public_id: Option<String>,
    pub github_token: Option<String>,
    pub codeforces_username: Option<String>,
    pub leetcode_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    #[allow(clippy::wrong_self_convention)]
    pub fn to_user(self, encryption: &EncryptionService) -> Result<User, DomainError> {
        // No plaintext fallback: a token that does not decrypt is corrupt
        let github_token = self
            .github_token
            .map(|encrypted| {
                encryption.decrypt(&encrypted).map_err(|e| {
                    DomainError::DataIntegrity(format!(
                        "Failed to decrypt GitHub token for user {}: {}",
                        self.id, e
                    ))
                })
            })
            .transpose()?;

        Ok(User::restore(
            UserId::from_string(&self.id),
            self.name,
            Email::from_persistence(self.email),
            self.password_hash,
            self.is_verified,
            self.description,
            self.profile_picture,
            self.profile_picture_public_id,
            github_token,
            self.codeforces_username.map(ProviderHandle::from_persistence),
            self.leetcode_username.map(ProviderHandle::from_persistence),
            self.created_at,
            self.updated_at,
        ))
    }
}
