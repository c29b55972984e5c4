use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use codefolio_infrastructure::config::TimeoutConfig;
use codefolio_infrastructure::http::clist::ClistCredentials;
use codefolio_infrastructure::http::github::GithubOAuthConfig;
use codefolio_infrastructure::mail::SmtpSettings;
use codefolio_infrastructure::media::CloudinaryCredentials;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// OAuth app credentials plus the key that signs the `state` parameter
#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub oauth: GithubOAuthConfig,
    pub state_secret: String,
}

/// Process configuration, read once at start-up
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub token_ttl: chrono::Duration,
    pub github: GithubSettings,
    pub smtp: SmtpSettings,
    pub cloudinary: CloudinaryCredentials,
    pub clist: ClistCredentials,
    pub timeouts: TimeoutConfig,
    pub log_dir: PathBuf,
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_DATABASE_URL: &'static str = "sqlite://codefolio.db";
    const DEFAULT_SMTP_HOST: &'static str = "smtp.gmail.com";
    const DEFAULT_SMTP_PORT: u16 = 465;
    const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;
    const DEFAULT_LOG_DIR: &'static str = "logs";

    /// Read the process environment, loading `.env` first when present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let secret_key = env.required("SECRET_KEY")?;
        let provider_timeout = Duration::from_secs(
            env.parsed("PROVIDER_TIMEOUT_SECS", Self::DEFAULT_PROVIDER_TIMEOUT_SECS)?,
        );
        let timeouts = TimeoutConfig::new().with_provider_fetch(provider_timeout);
        let token_ttl_days: i64 = env.parsed("TOKEN_TTL_DAYS", Self::DEFAULT_TOKEN_TTL_DAYS)?;
        if token_ttl_days <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_DAYS",
                value: token_ttl_days.to_string(),
            });
        }

        Ok(Self {
            port: env.parsed("PORT", Self::DEFAULT_PORT)?,
            database_url: env.or("DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            token_ttl: chrono::Duration::days(token_ttl_days),
            github: GithubSettings {
                oauth: GithubOAuthConfig {
                    client_id: env.or("GITHUB_CLIENT_ID", ""),
                    client_secret: env.or("GITHUB_CLIENT_SECRET", ""),
                },
                state_secret: env.or("GITHUB_SECRET_KEY", &secret_key),
            },
            smtp: SmtpSettings {
                host: env.or("SMTP_HOST", Self::DEFAULT_SMTP_HOST),
                port: env.parsed("SMTP_PORT", Self::DEFAULT_SMTP_PORT)?,
                username: env.required("EMAIL")?,
                password: env.required("EMAIL_PASSWORD")?,
                timeout: timeouts.smtp,
            },
            cloudinary: CloudinaryCredentials {
                cloud_name: env.or("CLOUDINARY_CLOUD_NAME", ""),
                api_key: env.or("CLOUDINARY_API_KEY", ""),
                api_secret: env.or("CLOUDINARY_API_SECRET", ""),
            },
            clist: ClistCredentials {
                username: env.or("CLIST_USERNAME", ""),
                api_key: env.or("CLIST_API_KEY", ""),
            },
            timeouts,
            log_dir: PathBuf::from(env.or("LOG_DIR", Self::DEFAULT_LOG_DIR)),
            secret_key,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Blank values count as unset
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        }
    }
}
