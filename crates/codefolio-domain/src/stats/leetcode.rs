use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPercentage {
    pub difficulty: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeProfile {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeLanguageCount {
    pub language_name: String,
    pub problems_solved: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeTagCount {
    pub tag_name: String,
    pub tag_slug: String,
    pub problems_solved: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeetcodeTagCounts {
    pub advanced: Vec<LeetcodeTagCount>,
    pub intermediate: Vec<LeetcodeTagCount>,
    pub fundamental: Vec<LeetcodeTagCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeContestRanking {
    pub rating: f64,
    pub global_ranking: Option<u64>,
    pub attended_contests_count: u64,
    pub total_participants: Option<u64>,
    pub top_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeContest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub attended: bool,
    pub problems_solved: u64,
    pub total_problems: u64,
    pub rating: f64,
    pub ranking: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetcodeGraphs {
    /// Problem counts available on the site, per difficulty
    pub all_problems: Vec<DifficultyCount>,
    pub profile: LeetcodeProfile,
    pub solved: Vec<DifficultyCount>,
    pub beats: Vec<DifficultyPercentage>,
    pub languages: Vec<LeetcodeLanguageCount>,
    pub tags: LeetcodeTagCounts,
    pub contest_ranking: Option<LeetcodeContestRanking>,
    pub contest_history: Vec<LeetcodeContest>,
}

impl LeetcodeGraphs {
    /// Keep only attended contests, oldest first.
    pub fn normalize_contest_history(mut self) -> Self {
        self.contest_history.retain(|c| c.attended);
        self.contest_history.sort_by_key(|c| c.start_time);
        self
    }
}
