mod auth_service;
mod contest_service;
mod github_link_service;
mod notification_service;
mod profile_service;
mod social_service;

pub use auth_service::{
    AuthService, AuthSession, ResetPasswordCommand, SignupCommand, PASSWORD_RESET_DONE,
    PASSWORD_RESET_SENT, SIGNUP_SUCCESS,
};
pub use contest_service::ContestService;
pub use github_link_service::{GithubAuthorizationStart, GithubLinkService, GITHUB_LINKED};
pub use notification_service::{NotificationService, NOTIFICATIONS_SEEN, NOTIFICATION_SEEN};
pub use profile_service::ProfileService;
pub use social_service::{SocialService, FOLLOWED, UNFOLLOWED};
