use chrono::{DateTime, Utc};

use super::value_objects::{Email, ProviderHandle};
use crate::contribution::Provider;
use crate::shared::{DomainError, UserId};

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
    is_verified: bool,
    description: Option<String>,
    profile_picture: Option<String>,
    profile_picture_public_id: Option<String>,
    github_token: Option<String>,
    codeforces_username: Option<ProviderHandle>,
    leetcode_username: Option<ProviderHandle>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves a field untouched; a blank handle
/// unlinks the provider.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub codeforces_username: Option<String>,
    pub leetcode_username: Option<String>,
}

impl User {
    const MAX_NAME_LEN: usize = 100;
    const MAX_DESCRIPTION_LEN: usize = 1000;

    /// Register a new, unverified user
    pub fn register(name: &str, email: Email, password_hash: String) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;
        let now = Utc::now();

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            is_verified: false,
            description: None,
            profile_picture: None,
            profile_picture_public_id: None,
            github_token: None,
            codeforces_username: None,
            leetcode_username: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from persistence
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        name: String,
        email: Email,
        password_hash: String,
        is_verified: bool,
        description: Option<String>,
        profile_picture: Option<String>,
        profile_picture_public_id: Option<String>,
        github_token: Option<String>,
        codeforces_username: Option<ProviderHandle>,
        leetcode_username: Option<ProviderHandle>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            is_verified,
            description,
            profile_picture,
            profile_picture_public_id,
            github_token,
            codeforces_username,
            leetcode_username,
            created_at,
            updated_at,
        }
    }

    // Getters
    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    pub fn profile_picture_public_id(&self) -> Option<&str> {
        self.profile_picture_public_id.as_deref()
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    pub fn codeforces_username(&self) -> Option<&ProviderHandle> {
        self.codeforces_username.as_ref()
    }

    pub fn leetcode_username(&self) -> Option<&ProviderHandle> {
        self.leetcode_username.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_linked(&self, provider: Provider) -> bool {
        match provider {
            Provider::Github => self.github_token.is_some(),
            Provider::Codeforces => self.codeforces_username.is_some(),
            Provider::Leetcode => self.leetcode_username.is_some(),
        }
    }

    // Business methods

    /// Signing up again before verification replaces the pending credentials
    pub fn reregister(&mut self, name: &str, password_hash: String) -> Result<(), DomainError> {
        if self.is_verified {
            return Err(DomainError::Conflict(
                "User with the same email already exists".to_string(),
            ));
        }
        self.name = Self::validate_name(name)?;
        self.password_hash = password_hash;
        self.touch();
        Ok(())
    }

    pub fn verify(&mut self) {
        self.is_verified = true;
        self.touch();
    }

    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    pub fn link_github(&mut self, token: String) {
        self.github_token = Some(token);
        self.touch();
    }

    pub fn unlink_github(&mut self) {
        self.github_token = None;
        self.touch();
    }

    /// Replace the profile picture, returning the public id of the image it replaces
    pub fn set_profile_picture(&mut self, url: String, public_id: String) -> Option<String> {
        self.profile_picture = Some(url);
        let previous = self.profile_picture_public_id.replace(public_id);
        self.touch();
        previous
    }

    pub fn apply_profile_changes(&mut self, changes: ProfileChanges) -> Result<(), DomainError> {
        if let Some(name) = changes.name {
            self.name = Self::validate_name(&name)?;
        }
        if let Some(description) = changes.description {
            let description = description.trim();
            if description.chars().count() > Self::MAX_DESCRIPTION_LEN {
                return Err(DomainError::Validation(format!(
                    "Description must be at most {} characters",
                    Self::MAX_DESCRIPTION_LEN
                )));
            }
            self.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(handle) = changes.codeforces_username {
            self.codeforces_username = ProviderHandle::parse(&handle)?;
        }
        if let Some(handle) = changes.leetcode_username {
            self.leetcode_username = ProviderHandle::parse(&handle)?;
        }
        self.touch();
        Ok(())
    }

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name cannot be empty".to_string()));
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "Name must be at most {} characters",
                Self::MAX_NAME_LEN
            )));
        }
        Ok(name.to_string())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
