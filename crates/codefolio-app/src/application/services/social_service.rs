use std::sync::Arc;
use tracing::info;

use super::NotificationService;
use codefolio_domain::notification::{Notification, NotificationKind};
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::social::{Follow, FollowRepository};
use codefolio_domain::user::{User, UserRepository};

pub const FOLLOWED: &str = "User followed successfully";
pub const UNFOLLOWED: &str = "User unfollowed successfully";

/// Follow edges between users
pub struct SocialService {
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    notifications: Arc<NotificationService>,
}

impl SocialService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            user_repo,
            follow_repo,
            notifications,
        }
    }

    /// Follow `followee_id`; a new edge notifies the followee
    pub async fn follow(&self, follower: &User, followee_id: &UserId) -> Result<String, DomainError> {
        let edge = Follow::new(follower.id().clone(), followee_id.clone())?;
        let followee = self.existing_user(followee_id).await?;

        if self.follow_repo.follow(&edge).await? {
            self.notifications
                .send(
                    followee.id(),
                    &Notification::following_description(follower.name()),
                    NotificationKind::Following,
                    Some(follower.id()),
                )
                .await?;
            info!("User {} followed {}", follower.id(), followee.id());
        }
        Ok(FOLLOWED.to_string())
    }

    pub async fn unfollow(&self, follower: &User, followee_id: &UserId) -> Result<String, DomainError> {
        let edge = Follow::new(follower.id().clone(), followee_id.clone())?;
        if !self.follow_repo.unfollow(&edge).await? {
            return Err(DomainError::NotFound(
                "You are not following this user".to_string(),
            ));
        }
        Ok(UNFOLLOWED.to_string())
    }

    pub async fn followers(&self, user_id: &UserId) -> Result<Vec<User>, DomainError> {
        self.existing_user(user_id).await?;
        let ids = self.follow_repo.followers_of(user_id).await?;
        self.user_repo.find_by_ids(&ids).await
    }

    pub async fn following(&self, user_id: &UserId) -> Result<Vec<User>, DomainError> {
        self.existing_user(user_id).await?;
        let ids = self.follow_repo.following_of(user_id).await?;
        self.user_repo.find_by_ids(&ids).await
    }

    async fn existing_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound("User not found".to_string()))
    }
}
