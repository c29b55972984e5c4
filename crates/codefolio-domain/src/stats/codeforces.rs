use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::contribution::{ActivityEvent, ProviderSeries};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Other(String),
}

impl Verdict {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("OK") => Verdict::Accepted,
            Some(other) => Verdict::Other(other.to_string()),
            None => Verdict::Other("TESTING".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeforcesSubmission {
    pub created_at: DateTime<Utc>,
    pub verdict: Verdict,
    pub problem_rating: Option<u32>,
    pub tags: Vec<String>,
}

impl CodeforcesSubmission {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Accepted submissions become one activity event each.
pub fn accepted_submission_series(submissions: &[CodeforcesSubmission]) -> ProviderSeries {
    ProviderSeries::Events(
        submissions
            .iter()
            .filter(|s| s.is_accepted())
            .map(|s| ActivityEvent::single(s.created_at))
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: u64,
    pub contest_name: String,
    pub rank: u64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemTagCount {
    pub tag_name: String,
    pub problems_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRatingCount {
    pub difficulty: u32,
    pub problems_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesGraphs {
    pub rating_graph: Vec<RatingChange>,
    pub problem_rating_graph: Vec<ProblemRatingCount>,
    pub problem_tag_graph: Vec<ProblemTagCount>,
}

impl CodeforcesGraphs {
    /// Tag counts descending (ties by name), ratings ascending, over accepted
    /// submissions only.
    pub fn build(ratings: Vec<RatingChange>, submissions: &[CodeforcesSubmission]) -> Self {
        let mut tags: HashMap<&str, u64> = HashMap::new();
        let mut difficulties: HashMap<u32, u64> = HashMap::new();

        for submission in submissions.iter().filter(|s| s.is_accepted()) {
            for tag in &submission.tags {
                *tags.entry(tag.as_str()).or_insert(0) += 1;
            }
            if let Some(rating) = submission.problem_rating {
                *difficulties.entry(rating).or_insert(0) += 1;
            }
        }

        let mut problem_tag_graph: Vec<ProblemTagCount> = tags
            .into_iter()
            .map(|(tag, count)| ProblemTagCount {
                tag_name: tag.to_string(),
                problems_count: count,
            })
            .collect();
        problem_tag_graph.sort_by(|a, b| {
            b.problems_count
                .cmp(&a.problems_count)
                .then_with(|| a.tag_name.cmp(&b.tag_name))
        });

        let mut problem_rating_graph: Vec<ProblemRatingCount> = difficulties
            .into_iter()
            .map(|(difficulty, count)| ProblemRatingCount {
                difficulty,
                problems_count: count,
            })
            .collect();
        problem_rating_graph.sort_by_key(|r| r.difficulty);

        Self {
            rating_graph: ratings,
            problem_rating_graph,
            problem_tag_graph,
        }
    }
}
