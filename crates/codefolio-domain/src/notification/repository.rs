use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::aggregate::Notification;
use crate::shared::{DomainError, NotificationId, UserId};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification after deleting earlier ones with the same
    /// recipient, kind and sender
    async fn replace(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Newest first
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    /// Mark the recipient's notifications as seen; returns how many changed
    async fn mark_seen(
        &self,
        user_id: &UserId,
        ids: &[NotificationId],
        seen_at: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Delete notifications seen at or before `cutoff`
    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
