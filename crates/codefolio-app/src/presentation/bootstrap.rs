use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::config::AppConfig;
use crate::application::queries::{DashboardQueries, ProviderClients};
use crate::application::services::{
    AuthService, ContestService, GithubLinkService, NotificationService, ProfileService,
    SocialService,
};
use crate::presentation::state::{AppState, Queries, Repositories, Runtime, Services};
use codefolio_domain::github_link::{GithubAuthorization, GithubAuthorizationRepository};
use codefolio_domain::notification::NotificationRepository;
use codefolio_domain::providers::{GithubApi, GithubOAuth};
use codefolio_domain::social::FollowRepository;
use codefolio_domain::user::UserRepository;
use codefolio_domain::verification::VerificationCodeRepository;
use codefolio_infrastructure::http::{
    ClistClient, CodeforcesClient, GithubClient, HttpClient, LeetcodeClient, RetryConfig,
};
use codefolio_infrastructure::mail::SmtpMailer;
use codefolio_infrastructure::media::CloudinaryImageStore;
use codefolio_infrastructure::persistence::{
    repositories::{
        SqliteFollowRepository, SqliteGithubAuthorizationRepository, SqliteNotificationRepository,
        SqliteUserRepository, SqliteVerificationCodeRepository,
    },
    Database,
};
use codefolio_infrastructure::security::{
    EncryptionService, JwtService, PasswordHashParams, PasswordService,
};

pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("🔌 Connecting to database...");
    let started_at = Instant::now();
    let database = Database::connect(&config.database_url, config.timeouts.db_acquire)
        .await
        .context("Failed to connect to database")?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    assemble(config, database).await
}

/// Wire repositories, adapters and services on top of an open database
pub(crate) async fn assemble(config: &AppConfig, database: Database) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database
        .run_migrations()
        .await
        .context("Failed to run migrations")?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    info!("🔐 Initializing security...");
    let started_at = Instant::now();
    let encryption_service = Arc::new(
        EncryptionService::from_secret(&config.secret_key)
            .context("Failed to create encryption service")?,
    );
    let session_tokens = Arc::new(JwtService::new(&config.secret_key, config.token_ttl)?);
    let state_tokens = Arc::new(JwtService::new(
        &config.github.state_secret,
        GithubAuthorization::ttl(),
    )?);
    let passwords = Arc::new(PasswordService::new(PasswordHashParams::default())?);
    info!(
        "✓ Security initialized ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let user_repo = Arc::new(SqliteUserRepository::new(
        pool.clone(),
        encryption_service.clone(),
    )) as Arc<dyn UserRepository>;
    let code_repo = Arc::new(SqliteVerificationCodeRepository::new(pool.clone()))
        as Arc<dyn VerificationCodeRepository>;
    let authorization_repo = Arc::new(SqliteGithubAuthorizationRepository::new(pool.clone()))
        as Arc<dyn GithubAuthorizationRepository>;
    let follow_repo =
        Arc::new(SqliteFollowRepository::new(pool.clone())) as Arc<dyn FollowRepository>;
    let notification_repo = Arc::new(SqliteNotificationRepository::new(pool.clone()))
        as Arc<dyn NotificationRepository>;

    info!("🌐 Building HTTP clients...");
    let started_at = Instant::now();
    let provider_http = HttpClient::with_config(
        RetryConfig::for_providers(),
        config.timeouts.http_request,
    )?;
    let plain_http = HttpClient::new(config.timeouts.http_request)?;

    let github = Arc::new(GithubClient::new(
        provider_http.clone(),
        config.github.oauth.clone(),
    ));
    let providers = ProviderClients {
        github: github.clone() as Arc<dyn GithubApi>,
        codeforces: Arc::new(CodeforcesClient::new(provider_http.clone())),
        leetcode: Arc::new(LeetcodeClient::new(provider_http.clone())),
    };
    let contest_feed = Arc::new(ClistClient::new(provider_http, config.clist.clone()));
    let image_store = Arc::new(CloudinaryImageStore::new(
        plain_http,
        config.cloudinary.clone(),
    ));
    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone())?);
    info!(
        "✓ HTTP clients ready ({}ms)",
        started_at.elapsed().as_millis()
    );

    let notification = Arc::new(NotificationService::new(
        notification_repo.clone(),
        user_repo.clone(),
    ));
    let services = Services {
        auth: Arc::new(AuthService::new(
            user_repo.clone(),
            code_repo.clone(),
            mailer,
            passwords,
            session_tokens,
        )),
        github_link: Arc::new(GithubLinkService::new(
            user_repo.clone(),
            authorization_repo.clone(),
            github as Arc<dyn GithubOAuth>,
            state_tokens,
        )),
        profile: Arc::new(ProfileService::new(user_repo.clone(), image_store)),
        social: Arc::new(SocialService::new(
            user_repo.clone(),
            follow_repo.clone(),
            notification.clone(),
        )),
        notification,
        contest: Arc::new(ContestService::new(contest_feed)),
    };

    let queries = Queries {
        dashboard: Arc::new(DashboardQueries::new(
            user_repo.clone(),
            providers,
            config.timeouts.provider_fetch,
        )),
    };

    info!(
        "✓ Application state ready ({}ms total)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            encryption_service,
        },
        repositories: Repositories {
            user: user_repo,
            verification_code: code_repo,
            github_authorization: authorization_repo,
            follow: follow_repo,
            notification: notification_repo,
        },
        services,
        queries,
    })
}
