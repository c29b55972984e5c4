use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use codefolio_domain::notification::{Notification, NotificationRepository};
use codefolio_domain::shared::{DomainError, NotificationId, UserId};

#[derive(FromRow)]
struct NotificationRow {
    id: String,
    recipient_id: String,
    sender_id: Option<String>,
    kind: String,
    description: String,
    seen_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_notification(self) -> Result<Notification, DomainError> {
        Ok(Notification::from_persistence(
            NotificationId::from_string(&self.id),
            UserId::from_string(&self.recipient_id),
            self.sender_id.as_deref().map(UserId::from_string),
            self.kind.parse()?,
            self.description,
            self.seen_at,
            self.created_at,
        ))
    }
}

pub struct SqliteNotificationRepository {
    base: SqliteRepositoryBase,
}

impl SqliteNotificationRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn replace(&self, notification: &Notification) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO notifications (id, recipient_id, sender_id, kind, description, seen_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                description = ?5,
                seen_at = ?6
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(notification.id().as_str())
                    .bind(notification.recipient().as_str())
                    .bind(notification.sender().map(|s| s.as_str()))
                    .bind(notification.kind().as_str())
                    .bind(notification.description())
                    .bind(notification.seen_at())
                    .bind(notification.created_at()),
                "Save notification",
            )
            .await?;

        Ok(())
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let query = r#"
            SELECT id, recipient_id, sender_id, kind, description, seen_at, created_at
            FROM notifications
            WHERE recipient_id = ?1
            ORDER BY created_at DESC
        "#;

        let rows: Vec<NotificationRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find notifications for user",
            )
            .await?;

        rows.into_iter().map(NotificationRow::into_notification).collect()
    }

    /// Only the recipient's own unseen notifications are touched
    async fn mark_seen(
        &self,
        user_id: &UserId,
        ids: &[NotificationId],
        seen_at: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = (3..ids.len() + 3)
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");
        let query = format!(
            "UPDATE notifications SET seen_at = ?1 WHERE recipient_id = ?2 AND seen_at IS NULL AND id IN ({})",
            placeholders
        );

        let mut query_builder = sqlx::query(&query).bind(seen_at).bind(user_id.as_str());
        for id in ids {
            query_builder = query_builder.bind(id.as_str());
        }

        let result = self.base.execute(query_builder, "Mark notifications seen").await?;
        Ok(result.rows_affected())
    }

    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM notifications WHERE seen_at IS NOT NULL AND seen_at <= ?1")
                    .bind(cutoff),
                "Purge seen notifications",
            )
            .await?;
        Ok(result.rows_affected())
    }
}
