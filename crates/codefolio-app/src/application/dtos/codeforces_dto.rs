use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codefolio_domain::stats::{CodeforcesGraphs, ProblemRatingCount, ProblemTagCount, RatingChange};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "RatingChange")]
pub struct RatingChangeDto {
    pub contest_id: u64,
    pub contest_name: String,
    pub rank: u64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "ProblemTagCount")]
pub struct ProblemTagCountDto {
    pub tag_name: String,
    pub problems_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "ProblemRatingCount")]
pub struct ProblemRatingCountDto {
    pub difficulty: u32,
    pub problems_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "CodeforcesGraphs")]
pub struct CodeforcesGraphsDto {
    pub rating_graph: Vec<RatingChangeDto>,
    pub problem_rating_graph: Vec<ProblemRatingCountDto>,
    pub problem_tag_graph: Vec<ProblemTagCountDto>,
}

impl From<RatingChange> for RatingChangeDto {
    fn from(change: RatingChange) -> Self {
        Self {
            contest_id: change.contest_id,
            contest_name: change.contest_name,
            rank: change.rank,
            old_rating: change.old_rating,
            new_rating: change.new_rating,
            date: change.date,
        }
    }
}

impl From<CodeforcesGraphs> for CodeforcesGraphsDto {
    fn from(graphs: CodeforcesGraphs) -> Self {
        Self {
            rating_graph: graphs.rating_graph.into_iter().map(Into::into).collect(),
            problem_rating_graph: graphs
                .problem_rating_graph
                .into_iter()
                .map(|ProblemRatingCount { difficulty, problems_count }| ProblemRatingCountDto {
                    difficulty,
                    problems_count,
                })
                .collect(),
            problem_tag_graph: graphs
                .problem_tag_graph
                .into_iter()
                .map(|ProblemTagCount { tag_name, problems_count }| ProblemTagCountDto {
                    tag_name,
                    problems_count,
                })
                .collect(),
        }
    }
}
