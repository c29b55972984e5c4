//! Provider-specific dashboard statistics and the pure reshaping that builds them.

mod codeforces;
mod github;
mod leetcode;

pub use codeforces::{
    accepted_submission_series, CodeforcesGraphs, CodeforcesSubmission, ProblemRatingCount,
    ProblemTagCount, RatingChange, Verdict,
};
pub use github::{
    GithubCalendar, GithubGraphs, GithubProfileSnapshot, GithubStatistics, LanguageUsage,
    PinnedRepository, PrimaryLanguage, RepositorySnapshot,
};
pub use leetcode::{
    DifficultyCount, DifficultyPercentage, LeetcodeContest, LeetcodeContestRanking,
    LeetcodeGraphs, LeetcodeLanguageCount, LeetcodeProfile, LeetcodeTagCount, LeetcodeTagCounts,
};
