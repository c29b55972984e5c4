use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::application::dtos::{NotificationDto, NotificationsDto, UserSummaryDto};
use codefolio_domain::notification::{Notification, NotificationKind, NotificationRepository};
use codefolio_domain::shared::{DomainError, NotificationId, UserId};
use codefolio_domain::user::UserRepository;

pub const NOTIFICATION_SEEN: &str = "Notification seen";
pub const NOTIFICATIONS_SEEN: &str = "Notifications seen";

pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
        }
    }

    /// Deliver a notification, superseding earlier ones of the same kind from
    /// the same sender
    pub async fn send(
        &self,
        to: &UserId,
        description: &str,
        kind: NotificationKind,
        from: Option<&UserId>,
    ) -> Result<(), DomainError> {
        let notification = Notification::new(to.clone(), from.cloned(), kind, description)?;
        self.notification_repo.replace(&notification).await
    }

    /// The recipient's notifications, newest first, with the sender's summary
    pub async fn list(&self, recipient: &UserId) -> Result<NotificationsDto, DomainError> {
        let purged = self
            .notification_repo
            .delete_seen_before(Utc::now() - Notification::retention())
            .await?;
        if purged > 0 {
            debug!("Purged {} seen notifications", purged);
        }

        let notifications = self.notification_repo.find_for_user(recipient).await?;

        let mut sender_ids: Vec<UserId> = notifications
            .iter()
            .filter_map(|n| n.sender().cloned())
            .collect();
        sender_ids.sort();
        sender_ids.dedup();

        let senders: HashMap<UserId, UserSummaryDto> = self
            .user_repo
            .find_by_ids(&sender_ids)
            .await?
            .iter()
            .map(|u| (u.id().clone(), UserSummaryDto::from(u)))
            .collect();

        let unseen_notifications = notifications.iter().filter(|n| !n.is_seen()).count() as u32;
        let notifications = notifications
            .iter()
            .map(|n| {
                let other_user = n.sender().and_then(|id| senders.get(id).cloned());
                NotificationDto::new(n, other_user)
            })
            .collect();

        Ok(NotificationsDto {
            unseen_notifications,
            notifications,
        })
    }

    pub async fn see(&self, recipient: &UserId, id: &str) -> Result<String, DomainError> {
        self.mark_seen(recipient, &[NotificationId::from_string(id)])
            .await?;
        Ok(NOTIFICATION_SEEN.to_string())
    }

    pub async fn see_many(&self, recipient: &UserId, ids: &[String]) -> Result<String, DomainError> {
        let ids: Vec<NotificationId> = ids.iter().map(|id| NotificationId::from_string(id)).collect();
        self.mark_seen(recipient, &ids).await?;
        Ok(NOTIFICATIONS_SEEN.to_string())
    }

    async fn mark_seen(&self, recipient: &UserId, ids: &[NotificationId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }
        let changed = self
            .notification_repo
            .mark_seen(recipient, ids, Utc::now())
            .await?;
        debug!("Marked {} of {} notifications seen", changed, ids.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{verified_user, InMemoryNotifications, InMemoryUsers};
    use chrono::Duration;

    struct Harness {
        service: NotificationService,
        users: Arc<InMemoryUsers>,
        notifications: Arc<InMemoryNotifications>,
    }

    fn harness() -> Harness {
        let users = Arc::new(InMemoryUsers::new());
        let notifications = Arc::new(InMemoryNotifications::new());
        Harness {
            service: NotificationService::new(notifications.clone(), users.clone()),
            users,
            notifications,
        }
    }

    #[tokio::test]
    async fn test_list_includes_sender_and_unseen_count() {
        let h = harness();
        let alice = verified_user(&h.users, "Alice", "alice@example.com").await;
        let bob = verified_user(&h.users, "Bob", "bob@example.com").await;

        h.service
            .send(bob.id(), "Alice started following you", NotificationKind::Following, Some(alice.id()))
            .await
            .unwrap();

        let listed = h.service.list(bob.id()).await.unwrap();
        assert_eq!(listed.unseen_notifications, 1);
        assert_eq!(listed.notifications.len(), 1);
        let other = listed.notifications[0].other_user.as_ref().unwrap();
        assert_eq!(other.name, "Alice");
        assert_eq!(listed.notifications[0].notification_type, "FOLLOWING");
    }

    #[tokio::test]
    async fn test_resend_replaces_previous() {
        let h = harness();
        let alice = verified_user(&h.users, "Alice", "alice@example.com").await;
        let bob = verified_user(&h.users, "Bob", "bob@example.com").await;

        for text in ["first", "second"] {
            h.service
                .send(bob.id(), text, NotificationKind::Following, Some(alice.id()))
                .await
                .unwrap();
        }

        let listed = h.service.list(bob.id()).await.unwrap();
        assert_eq!(listed.notifications.len(), 1);
        assert_eq!(listed.notifications[0].description, "second");
    }

    #[tokio::test]
    async fn test_see_is_scoped_to_recipient() {
        let h = harness();
        let alice = verified_user(&h.users, "Alice", "alice@example.com").await;
        let bob = verified_user(&h.users, "Bob", "bob@example.com").await;
        h.service
            .send(bob.id(), "hello", NotificationKind::Following, Some(alice.id()))
            .await
            .unwrap();
        let id = h.service.list(bob.id()).await.unwrap().notifications[0].id.clone();

        // alice cannot mark bob's notification
        assert_eq!(h.service.see(alice.id(), &id).await.unwrap(), NOTIFICATION_SEEN);
        assert_eq!(h.service.list(bob.id()).await.unwrap().unseen_notifications, 1);

        assert_eq!(
            h.service.see_many(bob.id(), &[id]).await.unwrap(),
            NOTIFICATIONS_SEEN
        );
        let listed = h.service.list(bob.id()).await.unwrap();
        assert_eq!(listed.unseen_notifications, 0);
        assert!(listed.notifications[0].seen_status);
    }

    #[tokio::test]
    async fn test_old_seen_notifications_are_purged() {
        let h = harness();
        let bob = verified_user(&h.users, "Bob", "bob@example.com").await;
        h.service
            .send(bob.id(), "old news", NotificationKind::Following, None)
            .await
            .unwrap();
        let id = h.service.list(bob.id()).await.unwrap().notifications[0].id.clone();
        h.service.see(bob.id(), &id).await.unwrap();

        h.notifications.age_seen(Duration::hours(25)).await;
        assert!(h.service.list(bob.id()).await.unwrap().notifications.is_empty());
    }
}
