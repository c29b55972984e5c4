use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codefolio_domain::stats::{
    DifficultyCount, DifficultyPercentage, LeetcodeContest, LeetcodeContestRanking,
    LeetcodeGraphs, LeetcodeLanguageCount, LeetcodeProfile, LeetcodeTagCount,
};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "DifficultyCount")]
pub struct DifficultyCountDto {
    pub difficulty: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "DifficultyPercentage")]
pub struct DifficultyPercentageDto {
    pub difficulty: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeProfile")]
pub struct LeetcodeProfileDto {
    pub username: String,
    pub real_name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
    pub skills: Vec<String>,
    pub country: Option<String>,
    pub ranking: Option<u64>,
    pub reputation: Option<i64>,
    pub solution_count: Option<u64>,
    pub post_view_count: Option<u64>,
    pub category_discuss_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeLanguageCount")]
pub struct LeetcodeLanguageCountDto {
    pub language_name: String,
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeTagCount")]
pub struct LeetcodeTagCountDto {
    pub tag_name: String,
    pub tag_slug: String,
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "LeetcodeTagCounts")]
pub struct LeetcodeTagCountsDto {
    pub advanced: Vec<LeetcodeTagCountDto>,
    pub intermediate: Vec<LeetcodeTagCountDto>,
    pub fundamental: Vec<LeetcodeTagCountDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeContestRanking")]
pub struct LeetcodeContestRankingDto {
    pub rating: f64,
    pub global_ranking: Option<u64>,
    pub attended_contests_count: u64,
    pub total_participants: Option<u64>,
    pub top_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeContest")]
pub struct LeetcodeContestDto {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub problems_solved: u64,
    pub total_problems: u64,
    pub rating: f64,
    pub ranking: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(name = "LeetcodeGraphs")]
pub struct LeetcodeGraphsDto {
    pub all_problems: Vec<DifficultyCountDto>,
    pub profile: LeetcodeProfileDto,
    pub solved: Vec<DifficultyCountDto>,
    pub beats: Vec<DifficultyPercentageDto>,
    pub languages: Vec<LeetcodeLanguageCountDto>,
    pub tags: LeetcodeTagCountsDto,
    pub contest_ranking: Option<LeetcodeContestRankingDto>,
    pub contest_history: Vec<LeetcodeContestDto>,
}

fn difficulty_counts(counts: Vec<DifficultyCount>) -> Vec<DifficultyCountDto> {
    counts
        .into_iter()
        .map(|c| DifficultyCountDto {
            difficulty: c.difficulty,
            count: c.count,
        })
        .collect()
}

fn tag_counts(tags: Vec<LeetcodeTagCount>) -> Vec<LeetcodeTagCountDto> {
    tags.into_iter()
        .map(|t| LeetcodeTagCountDto {
            tag_name: t.tag_name,
            tag_slug: t.tag_slug,
            problems_solved: t.problems_solved,
        })
        .collect()
}

impl From<LeetcodeProfile> for LeetcodeProfileDto {
    fn from(p: LeetcodeProfile) -> Self {
        Self {
            username: p.username,
            real_name: p.real_name,
            about: p.about,
            avatar: p.avatar,
            skills: p.skills,
            country: p.country,
            ranking: p.ranking,
            reputation: p.reputation,
            solution_count: p.solution_count,
            post_view_count: p.post_view_count,
            category_discuss_count: p.category_discuss_count,
        }
    }
}

impl From<LeetcodeContestRanking> for LeetcodeContestRankingDto {
    fn from(r: LeetcodeContestRanking) -> Self {
        Self {
            rating: r.rating,
            global_ranking: r.global_ranking,
            attended_contests_count: r.attended_contests_count,
            total_participants: r.total_participants,
            top_percentage: r.top_percentage,
        }
    }
}

impl From<LeetcodeContest> for LeetcodeContestDto {
    fn from(c: LeetcodeContest) -> Self {
        Self {
            title: c.title,
            start_time: c.start_time,
            problems_solved: c.problems_solved,
            total_problems: c.total_problems,
            rating: c.rating,
            ranking: c.ranking,
        }
    }
}

impl From<LeetcodeGraphs> for LeetcodeGraphsDto {
    fn from(graphs: LeetcodeGraphs) -> Self {
        Self {
            all_problems: difficulty_counts(graphs.all_problems),
            profile: graphs.profile.into(),
            solved: difficulty_counts(graphs.solved),
            beats: graphs
                .beats
                .into_iter()
                .map(|DifficultyPercentage { difficulty, percentage }| DifficultyPercentageDto {
                    difficulty,
                    percentage,
                })
                .collect(),
            languages: graphs
                .languages
                .into_iter()
                .map(|LeetcodeLanguageCount { language_name, problems_solved }| {
                    LeetcodeLanguageCountDto {
                        language_name,
                        problems_solved,
                    }
                })
                .collect(),
            tags: LeetcodeTagCountsDto {
                advanced: tag_counts(graphs.tags.advanced),
                intermediate: tag_counts(graphs.tags.intermediate),
                fundamental: tag_counts(graphs.tags.fundamental),
            },
            contest_ranking: graphs.contest_ranking.map(Into::into),
            contest_history: graphs.contest_history.into_iter().map(Into::into).collect(),
        }
    }
}
