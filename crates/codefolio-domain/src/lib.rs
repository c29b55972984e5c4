// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod contest;
pub mod contribution;
pub mod github_link;
pub mod mail;
pub mod media;
pub mod notification;
pub mod providers;
pub mod shared;
pub mod social;
pub mod stats;
pub mod user;
pub mod verification;

// Re-exports for convenience
pub use contribution::Provider;
pub use shared::{DomainError, NotificationId, UserId};
