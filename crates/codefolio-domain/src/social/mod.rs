use async_trait::async_trait;

use crate::shared::{DomainError, UserId};

/// Directed "follower follows followee" edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Follow {
    pub follower: UserId,
    pub followee: UserId,
}

impl Follow {
    pub fn new(follower: UserId, followee: UserId) -> Result<Self, DomainError> {
        if follower == followee {
            return Err(DomainError::InvalidInput(
                "You cannot follow yourself".to_string(),
            ));
        }
        Ok(Self { follower, followee })
    }
}

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Returns false when the edge already existed
    async fn follow(&self, follow: &Follow) -> Result<bool, DomainError>;

    /// Returns false when there was nothing to remove
    async fn unfollow(&self, follow: &Follow) -> Result<bool, DomainError>;

    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;

    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_rejected() {
        let id = UserId::new();
        assert!(Follow::new(id.clone(), id).is_err());
        assert!(Follow::new(UserId::new(), UserId::new()).is_ok());
    }
}
