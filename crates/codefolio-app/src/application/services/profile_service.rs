use std::sync::Arc;
use tracing::{info, warn};

use codefolio_domain::media::{ImageStore, ImageUpload};
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{ProfileChanges, User, UserRepository};

/// Profile lookups and edits, including the profile picture
pub struct ProfileService {
    user_repo: Arc<dyn UserRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl ProfileService {
    pub fn new(user_repo: Arc<dyn UserRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            user_repo,
            image_store,
        }
    }

    pub async fn find_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound("User not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        mut user: User,
        changes: ProfileChanges,
    ) -> Result<User, DomainError> {
        user.apply_profile_changes(changes)?;
        self.user_repo.save(&user).await?;
        Ok(user)
    }

    /// Upload the new picture first; the old one is deleted only once the
    /// user record points at the replacement.
    pub async fn upload_profile_picture(
        &self,
        mut user: User,
        upload: ImageUpload,
    ) -> Result<User, DomainError> {
        let stored = self.image_store.upload_profile_picture(&upload).await?;
        let previous = user.set_profile_picture(stored.url, stored.public_id);
        self.user_repo.save(&user).await?;
        info!("Updated profile picture for user {}", user.id());

        if let Some(public_id) = previous {
            if let Err(e) = self.image_store.delete(&public_id).await {
                warn!("Failed to delete old profile picture {}: {}", public_id, e);
            }
        }
        Ok(user)
    }
}
