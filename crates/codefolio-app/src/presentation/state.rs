use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::queries::DashboardQueries;
use crate::application::services::{
    AuthService, ContestService, GithubLinkService, NotificationService, ProfileService,
    SocialService,
};
use codefolio_domain::github_link::GithubAuthorizationRepository;
use codefolio_domain::notification::NotificationRepository;
use codefolio_domain::social::FollowRepository;
use codefolio_domain::user::UserRepository;
use codefolio_domain::verification::VerificationCodeRepository;
use codefolio_infrastructure::persistence::Database;
use codefolio_infrastructure::security::EncryptionService;

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub encryption_service: Arc<EncryptionService>,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub verification_code: Arc<dyn VerificationCodeRepository>,
    pub github_authorization: Arc<dyn GithubAuthorizationRepository>,
    pub follow: Arc<dyn FollowRepository>,
    pub notification: Arc<dyn NotificationRepository>,
}

pub struct Services {
    pub auth: Arc<AuthService>,
    pub github_link: Arc<GithubLinkService>,
    pub profile: Arc<ProfileService>,
    pub social: Arc<SocialService>,
    pub notification: Arc<NotificationService>,
    pub contest: Arc<ContestService>,
}

pub struct Queries {
    pub dashboard: Arc<DashboardQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
}
