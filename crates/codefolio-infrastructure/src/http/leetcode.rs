use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use super::{provider_error, rejected, HttpClient};
use codefolio_domain::contribution::ActivityEvent;
use codefolio_domain::providers::LeetcodeApi;
use codefolio_domain::shared::DomainError;
use codefolio_domain::stats::{
    DifficultyCount, DifficultyPercentage, LeetcodeContest, LeetcodeContestRanking,
    LeetcodeGraphs, LeetcodeLanguageCount, LeetcodeProfile, LeetcodeTagCount, LeetcodeTagCounts,
};
use codefolio_domain::Provider;

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const SUBMISSION_CALENDAR_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    submissionCalendar
  }
}"#;

const GRAPHS_QUERY: &str = r#"
query data($username: String!) {
  problems: allQuestionsCount {
    difficulty
    count
  }
  user: matchedUser(username: $username) {
    username
    profile {
      realName
      aboutMe
      userAvatar
      skillTags
      countryName
      ranking
      categoryDiscussCount
      solutionCount
      reputation
      postViewCount
    }
    languageProblemCount {
      languageName
      problemsSolved
    }
    tagProblemCounts {
      advanced { tagName tagSlug problemsSolved }
      intermediate { tagName tagSlug problemsSolved }
      fundamental { tagName tagSlug problemsSolved }
    }
    problemsSolvedBeatsStats {
      difficulty
      percentage
    }
    submitStatsGlobal {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
  contest: userContestRanking(username: $username) {
    rating
    globalRanking
    attendedContestsCount
    totalParticipants
    topPercentage
  }
  contestHistory: userContestRankingHistory(username: $username) {
    attended
    problemsSolved
    totalProblems
    rating
    ranking
    contest {
      title
      startTime
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarData {
    matched_user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    /// JSON object encoded as a string: unix seconds -> submissions
    submission_calendar: String,
}

/// Parse the `submissionCalendar` string into one weighted event per entry
fn parse_submission_calendar(raw: &str) -> Result<Vec<ActivityEvent>, DomainError> {
    let entries: HashMap<String, u64> = serde_json::from_str(raw).map_err(|e| {
        DomainError::Serialization(format!("LeetCode submission calendar is malformed: {}", e))
    })?;

    let mut events = entries
        .into_iter()
        .map(|(seconds, count)| {
            let at = seconds
                .parse::<i64>()
                .ok()
                .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
                .ok_or_else(|| {
                    DomainError::Serialization(format!(
                        "LeetCode calendar key is not a timestamp: {}",
                        seconds
                    ))
                })?;
            Ok(ActivityEvent::weighted(at, count))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    events.sort_by_key(|e| e.at);
    Ok(events)
}

#[derive(Debug, Deserialize)]
struct GraphsData {
    problems: Vec<DifficultyCount>,
    user: Option<GraphsUser>,
    contest: Option<ContestRankingPayload>,
    #[serde(rename = "contestHistory")]
    contest_history: Option<Vec<ContestHistoryPayload>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphsUser {
    username: String,
    profile: ProfilePayload,
    language_problem_count: Vec<LanguagePayload>,
    tag_problem_counts: TagCountsPayload,
    problems_solved_beats_stats: Vec<DifficultyPercentage>,
    submit_stats_global: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePayload {
    real_name: Option<String>,
    about_me: Option<String>,
    user_avatar: Option<String>,
    #[serde(default)]
    skill_tags: Vec<String>,
    country_name: Option<String>,
    ranking: Option<u64>,
    category_discuss_count: Option<u64>,
    solution_count: Option<u64>,
    reputation: Option<i64>,
    post_view_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguagePayload {
    language_name: String,
    problems_solved: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagPayload {
    tag_name: String,
    tag_slug: String,
    problems_solved: u64,
}

#[derive(Debug, Deserialize)]
struct TagCountsPayload {
    advanced: Vec<TagPayload>,
    intermediate: Vec<TagPayload>,
    fundamental: Vec<TagPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestRankingPayload {
    rating: f64,
    global_ranking: Option<u64>,
    attended_contests_count: u64,
    total_participants: Option<u64>,
    top_percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestHistoryPayload {
    attended: bool,
    problems_solved: u64,
    total_problems: u64,
    rating: f64,
    ranking: u64,
    contest: ContestPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestPayload {
    title: String,
    start_time: i64,
}

fn tags(payload: Vec<TagPayload>) -> Vec<LeetcodeTagCount> {
    payload
        .into_iter()
        .map(|t| LeetcodeTagCount {
            tag_name: t.tag_name,
            tag_slug: t.tag_slug,
            problems_solved: t.problems_solved,
        })
        .collect()
}

impl GraphsData {
    fn into_graphs(self, username: &str) -> Result<LeetcodeGraphs, DomainError> {
        let user = self.user.ok_or_else(|| DomainError::ProviderCredential {
            provider: Provider::Leetcode,
            message: format!("LeetCode user {} does not exist", username),
        })?;

        let contest_history = self
            .contest_history
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let start_time = DateTime::<Utc>::from_timestamp(entry.contest.start_time, 0)?;
                Some(LeetcodeContest {
                    title: entry.contest.title,
                    start_time,
                    attended: entry.attended,
                    problems_solved: entry.problems_solved,
                    total_problems: entry.total_problems,
                    rating: entry.rating,
                    ranking: entry.ranking,
                })
            })
            .collect();

        let profile = user.profile;
        Ok(LeetcodeGraphs {
            all_problems: self.problems,
            profile: LeetcodeProfile {
                username: user.username,
                real_name: profile.real_name,
                about: profile.about_me,
                avatar: profile.user_avatar,
                skills: profile.skill_tags,
                country: profile.country_name,
                ranking: profile.ranking,
                reputation: profile.reputation,
                solution_count: profile.solution_count,
                post_view_count: profile.post_view_count,
                category_discuss_count: profile.category_discuss_count,
            },
            solved: user.submit_stats_global.ac_submission_num,
            beats: user.problems_solved_beats_stats,
            languages: user
                .language_problem_count
                .into_iter()
                .map(|l| LeetcodeLanguageCount {
                    language_name: l.language_name,
                    problems_solved: l.problems_solved,
                })
                .collect(),
            tags: LeetcodeTagCounts {
                advanced: tags(user.tag_problem_counts.advanced),
                intermediate: tags(user.tag_problem_counts.intermediate),
                fundamental: tags(user.tag_problem_counts.fundamental),
            },
            contest_ranking: self.contest.map(|c| LeetcodeContestRanking {
                rating: c.rating,
                global_ranking: c.global_ranking,
                attended_contests_count: c.attended_contests_count,
                total_participants: c.total_participants,
                top_percentage: c.top_percentage,
            }),
            contest_history,
        }
        .normalize_contest_history())
    }
}

pub struct LeetcodeClient {
    http: HttpClient,
    graphql_url: String,
}

impl LeetcodeClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            graphql_url: GRAPHQL_URL.to_string(),
        }
    }

    pub fn with_graphql_url(mut self, url: &str) -> Self {
        self.graphql_url = url.to_string();
        self
    }

    async fn query<T>(&self, operation: &str, query: &'static str, username: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send,
    {
        let body = json!({ "query": query, "variables": { "username": username } });

        let response: GraphqlResponse<T> = self
            .http
            .send_json(operation, |client| client.post(&self.graphql_url).json(&body))
            .await
            .map_err(|e| provider_error(Provider::Leetcode, e))?;

        response
            .data
            .context("LeetCode returned no data")
            .map_err(|e| provider_error(Provider::Leetcode, e))
    }
}

#[async_trait]
impl LeetcodeApi for LeetcodeClient {
    async fn submission_calendar(&self, username: &str) -> Result<Vec<ActivityEvent>, DomainError> {
        let data: CalendarData = self
            .query("LeetCode submission calendar", SUBMISSION_CALENDAR_QUERY, username)
            .await?;

        let user = data.matched_user.ok_or_else(|| {
            provider_error(
                Provider::Leetcode,
                rejected(Provider::Leetcode, format!("LeetCode user {} does not exist", username)),
            )
        })?;

        parse_submission_calendar(&user.submission_calendar)
    }

    async fn graphs(&self, username: &str) -> Result<LeetcodeGraphs, DomainError> {
        let data: GraphsData = self.query("LeetCode graphs", GRAPHS_QUERY, username).await?;
        data.into_graphs(username)
    }
}
