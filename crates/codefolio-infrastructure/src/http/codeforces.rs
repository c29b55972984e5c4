use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{provider_error, rejected, HttpClient};
use codefolio_domain::providers::CodeforcesApi;
use codefolio_domain::shared::DomainError;
use codefolio_domain::stats::{CodeforcesSubmission, RatingChange, Verdict};
use codefolio_domain::Provider;

const API_BASE: &str = "https://codeforces.com/api";

/// `{"status": "OK", "result": ...}` or `{"status": "FAILED", "comment": ...}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionPayload {
    creation_time_seconds: i64,
    verdict: Option<String>,
    problem: ProblemPayload,
}

#[derive(Debug, Deserialize)]
struct ProblemPayload {
    rating: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingPayload {
    contest_id: u64,
    contest_name: String,
    rank: u64,
    rating_update_time_seconds: i64,
    old_rating: i64,
    new_rating: i64,
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        DomainError::Serialization(format!("Codeforces timestamp out of range: {}", seconds))
    })
}

impl TryFrom<SubmissionPayload> for CodeforcesSubmission {
    type Error = DomainError;

    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        Ok(CodeforcesSubmission {
            created_at: timestamp(payload.creation_time_seconds)?,
            verdict: Verdict::parse(payload.verdict.as_deref()),
            problem_rating: payload.problem.rating,
            tags: payload.problem.tags,
        })
    }
}

impl TryFrom<RatingPayload> for RatingChange {
    type Error = DomainError;

    fn try_from(payload: RatingPayload) -> Result<Self, Self::Error> {
        Ok(RatingChange {
            contest_id: payload.contest_id,
            contest_name: payload.contest_name,
            rank: payload.rank,
            old_rating: payload.old_rating,
            new_rating: payload.new_rating,
            date: timestamp(payload.rating_update_time_seconds)?,
        })
    }
}

pub struct CodeforcesClient {
    http: HttpClient,
    api_base: String,
}

impl CodeforcesClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            api_base: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Codeforces answers an unknown handle with 400 and a `FAILED` envelope,
    /// so the body is read before the status is judged.
    async fn call<T>(&self, method: &str, handle: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.api_base, method);
        let operation = format!("Codeforces {}", method);

        self.http
            .execute_with_retry(&operation, || {
                let request = self.http.inner().get(&url).query(&[("handle", handle)]);
                async move {
                    let response = request.send().await?;
                    let status = response.status();
                    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        response.error_for_status_ref()?;
                    }

                    let envelope: Envelope<T> = response
                        .json()
                        .await
                        .with_context(|| format!("Unexpected {} payload", method))?;

                    match (envelope.status.as_str(), envelope.result) {
                        ("OK", Some(result)) => Ok(result),
                        _ => Err(rejected(
                            Provider::Codeforces,
                            envelope
                                .comment
                                .unwrap_or_else(|| format!("{} failed", method)),
                        )),
                    }
                }
            })
            .await
            .map_err(|e| provider_error(Provider::Codeforces, e))
    }
}

#[async_trait]
impl CodeforcesApi for CodeforcesClient {
    async fn submissions(&self, handle: &str) -> Result<Vec<CodeforcesSubmission>, DomainError> {
        let payload: Vec<SubmissionPayload> = self.call("user.status", handle).await?;
        debug!("Codeforces returned {} submissions for {}", payload.len(), handle);
        payload.into_iter().map(TryInto::try_into).collect()
    }

    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>, DomainError> {
        let payload: Vec<RatingPayload> = self.call("user.rating", handle).await?;
        payload.into_iter().map(TryInto::try_into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_payload_maps_verdict_and_time() {
        let json = r#"{
            "status": "OK",
            "result": [
                {"id": 1, "creationTimeSeconds": 1704067200, "verdict": "OK",
                 "problem": {"contestId": 1, "index": "A", "rating": 800, "tags": ["math"]}},
                {"id": 2, "creationTimeSeconds": 1704067300,
                 "problem": {"contestId": 1, "index": "B", "tags": []}}
            ]
        }"#;
        let envelope: Envelope<Vec<SubmissionPayload>> = serde_json::from_str(json).unwrap();
        let submissions: Vec<CodeforcesSubmission> = envelope
            .result
            .unwrap()
            .into_iter()
            .map(|p| p.try_into().unwrap())
            .collect();

        assert!(submissions[0].is_accepted());
        assert_eq!(submissions[0].problem_rating, Some(800));
        assert_eq!(submissions[0].created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(!submissions[1].is_accepted());
    }

    #[test]
    fn test_failed_envelope_has_comment() {
        let json = r#"{"status": "FAILED", "comment": "handle: User with handle nobody not found"}"#;
        let envelope: Envelope<Vec<SubmissionPayload>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "FAILED");
        assert!(envelope.result.is_none());
        assert!(envelope.comment.unwrap().contains("not found"));
    }

    #[test]
    fn test_rating_payload_converts() {
        let json = r#"{"contestId": 1900, "contestName": "Round 1", "handle": "h", "rank": 12,
                       "ratingUpdateTimeSeconds": 1704067200, "oldRating": 1500, "newRating": 1580}"#;
        let payload: RatingPayload = serde_json::from_str(json).unwrap();
        let change = RatingChange::try_from(payload).unwrap();
        assert_eq!(change.new_rating - change.old_rating, 80);
    }
}
