use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::HttpClient;
use codefolio_domain::contest::Contest;
use codefolio_domain::providers::ContestFeed;
use codefolio_domain::shared::DomainError;

const API_URL: &str = "https://clist.by/api/v2/json/contest/";

#[derive(Debug, Clone)]
pub struct ClistCredentials {
    pub username: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
struct ContestPage {
    objects: Vec<ContestPayload>,
}

#[derive(Debug, Deserialize)]
struct ContestPayload {
    id: u64,
    event: String,
    host: String,
    href: String,
    #[serde(deserialize_with = "naive_utc")]
    start: DateTime<Utc>,
    #[serde(deserialize_with = "naive_utc")]
    end: DateTime<Utc>,
    duration: i64,
}

/// clist reports times as UTC without an offset
fn naive_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(serde::de::Error::custom)
}

impl From<ContestPayload> for Contest {
    fn from(payload: ContestPayload) -> Self {
        Contest {
            id: payload.id,
            event: payload.event,
            host: payload.host,
            href: payload.href,
            start: payload.start,
            end: payload.end,
            duration: payload.duration,
        }
    }
}

/// Upcoming contests from clist.by
pub struct ClistClient {
    http: HttpClient,
    credentials: ClistCredentials,
    api_url: String,
}

impl ClistClient {
    const PAGE_LIMIT: &'static str = "1000";

    pub fn new(http: HttpClient, credentials: ClistCredentials) -> Self {
        Self {
            http,
            credentials,
            api_url: API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }
}

#[async_trait]
impl ContestFeed for ClistClient {
    async fn upcoming_contests(&self) -> Result<Vec<Contest>, DomainError> {
        let page: ContestPage = self
            .http
            .send_json("clist upcoming contests", |client| {
                client.get(&self.api_url).query(&[
                    ("limit", Self::PAGE_LIMIT),
                    ("offset", "0"),
                    ("with_problems", "false"),
                    ("upcoming", "true"),
                    ("order_by", "start"),
                    ("username", self.credentials.username.as_str()),
                    ("api_key", self.credentials.api_key.as_str()),
                ])
            })
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Contest feed unavailable: {:#}", e)))?;

        Ok(page.objects.into_iter().map(Contest::from).collect())
    }
}
