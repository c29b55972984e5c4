pub mod follow_repo;
pub mod github_authorization_repo;
pub mod notification_repo;
pub mod user_repo;
pub mod verification_code_repo;

pub use follow_repo::SqliteFollowRepository;
pub use github_authorization_repo::SqliteGithubAuthorizationRepository;
pub use notification_repo::SqliteNotificationRepository;
pub use user_repo::SqliteUserRepository;
pub use verification_code_repo::SqliteVerificationCodeRepository;
