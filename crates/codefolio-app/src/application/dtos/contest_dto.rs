use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codefolio_domain::contest::{Contest, ContestSchedule};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "Contest")]
pub struct ContestDto {
    pub id: u64,
    pub event: String,
    pub host: String,
    pub href: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Seconds
    pub duration: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "ContestSchedule")]
pub struct ContestScheduleDto {
    pub today: Vec<ContestDto>,
    pub tomorrow: Vec<ContestDto>,
    pub week: Vec<ContestDto>,
    pub upcoming: Vec<ContestDto>,
}

impl From<Contest> for ContestDto {
    fn from(c: Contest) -> Self {
        Self {
            id: c.id,
            event: c.event,
            host: c.host,
            href: c.href,
            start: c.start,
            end: c.end,
            duration: c.duration,
        }
    }
}

impl From<ContestSchedule> for ContestScheduleDto {
    fn from(schedule: ContestSchedule) -> Self {
        let convert = |contests: Vec<Contest>| contests.into_iter().map(Into::into).collect();
        Self {
            today: convert(schedule.today),
            tomorrow: convert(schedule.tomorrow),
            week: convert(schedule.week),
            upcoming: convert(schedule.upcoming),
        }
    }
}
