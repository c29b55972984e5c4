use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummaryDto;
use codefolio_domain::notification::Notification;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "Notification")]
pub struct NotificationDto {
    pub id: String,
    pub description: String,
    /// `FOLLOWING`
    pub notification_type: String,
    pub seen_status: bool,
    pub seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Whoever triggered the notification
    pub other_user: Option<UserSummaryDto>,
}

impl NotificationDto {
    pub fn new(notification: &Notification, other_user: Option<UserSummaryDto>) -> Self {
        Self {
            id: notification.id().as_str().to_string(),
            description: notification.description().to_string(),
            notification_type: notification.kind().as_str().to_string(),
            seen_status: notification.is_seen(),
            seen_at: notification.seen_at(),
            created_at: notification.created_at(),
            other_user,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "Notifications")]
pub struct NotificationsDto {
    pub unseen_notifications: u32,
    pub notifications: Vec<NotificationDto>,
}
