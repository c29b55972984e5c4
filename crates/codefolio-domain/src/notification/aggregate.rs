use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::{DomainError, NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Following,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Following => "FOLLOWING",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOLLOWING" => Ok(NotificationKind::Following),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown notification kind: {}",
                other
            ))),
        }
    }
}

/// Notification aggregate root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    sender: Option<UserId>,
    kind: NotificationKind,
    description: String,
    seen_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        recipient: UserId,
        sender: Option<UserId>,
        kind: NotificationKind,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::Validation(
                "Notification description cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: NotificationId::new(),
            recipient,
            sender,
            kind,
            description,
            seen_at: None,
            created_at: Utc::now(),
        })
    }

    /// "`<name>` started following you" notice sent to the followee
    pub fn following(follower: &UserId, follower_name: &str, followee: &UserId) -> Result<Self, DomainError> {
        Self::new(
            followee.clone(),
            Some(follower.clone()),
            NotificationKind::Following,
            Self::following_description(follower_name),
        )
    }

    pub fn following_description(follower_name: &str) -> String {
        format!(
            "{} started following you, do you want to follow back?",
            follower_name
        )
    }

    pub fn from_persistence(
        id: NotificationId,
        recipient: UserId,
        sender: Option<UserId>,
        kind: NotificationKind,
        description: String,
        seen_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recipient,
            sender,
            kind,
            description,
            seen_at,
            created_at,
        }
    }

    // Getters
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn recipient(&self) -> &UserId {
        &self.recipient
    }

    pub fn sender(&self) -> Option<&UserId> {
        self.sender.as_ref()
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        self.seen_at
    }

    pub fn is_seen(&self) -> bool {
        self.seen_at.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn mark_seen(&mut self, at: DateTime<Utc>) {
        if self.seen_at.is_none() {
            self.seen_at = Some(at);
        }
    }

    /// Seen notifications are kept for a day
    pub fn retention() -> Duration {
        Duration::hours(24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_following_notification_text() {
        let follower = UserId::new();
        let followee = UserId::new();
        let n = Notification::following(&follower, "Linus", &followee).unwrap();
        assert_eq!(n.recipient(), &followee);
        assert_eq!(n.sender(), Some(&follower));
        assert_eq!(n.kind(), NotificationKind::Following);
        assert_eq!(
            n.description(),
            "Linus started following you, do you want to follow back?"
        );
        assert!(!n.is_seen());
    }

    #[test]
    fn test_mark_seen_keeps_first_timestamp() {
        let mut n = Notification::new(UserId::new(), None, NotificationKind::Following, "hi").unwrap();
        let first = Utc::now();
        n.mark_seen(first);
        n.mark_seen(first + Duration::minutes(5));
        assert_eq!(n.seen_at(), Some(first));
    }

    #[test]
    fn test_kind_roundtrip() {
        assert_eq!(
            NotificationKind::Following.as_str().parse::<NotificationKind>().unwrap(),
            NotificationKind::Following
        );
        assert!("LIKE".parse::<NotificationKind>().is_err());
    }
}
