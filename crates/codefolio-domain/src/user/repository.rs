use async_trait::async_trait;

use super::aggregate::User;
use super::value_objects::Email;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Users for the given ids; unknown ids are ignored
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;
}
