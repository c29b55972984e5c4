mod mutations;
mod queries;
mod types;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use crate::security::EncryptionService;
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{Email, User, UserRepository};

/// Users table. The linked GitHub token is stored encrypted.
pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
    encryption: Arc<EncryptionService>,
}

impl SqliteUserRepository {
    const SELECT_QUERY: &'static str = r#"
            SELECT
                id, name, email, password_hash, is_verified, description,
                profile_picture, profile_picture_public_id, github_token,
                codeforces_username, leetcode_username, created_at, updated_at
            FROM users
        "#;

    pub fn new(pool: Arc<SqlitePool>, encryption: Arc<EncryptionService>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
            encryption,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.save_impl(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.find_by_id_impl(id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        self.find_by_ids_impl(ids).await
    }
}
