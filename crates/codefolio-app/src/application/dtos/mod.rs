mod codeforces_dto;
mod contest_dto;
mod contribution_dto;
mod github_dto;
mod leetcode_dto;
mod notification_dto;
mod user_dto;

pub use codeforces_dto::*;
pub use contest_dto::*;
pub use contribution_dto::*;
pub use github_dto::*;
pub use leetcode_dto::*;
pub use notification_dto::*;
pub use user_dto::*;
