use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    pub id: u64,
    pub event: String,
    pub host: String,
    pub href: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Seconds
    pub duration: i64,
}

/// Upcoming contests grouped by UTC start date relative to now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSchedule {
    pub today: Vec<Contest>,
    pub tomorrow: Vec<Contest>,
    pub week: Vec<Contest>,
    pub upcoming: Vec<Contest>,
}

impl ContestSchedule {
    const WEEK_DAYS: i64 = 7;

    /// Contests starting on or before today land in `today`, the next
    /// calendar day in `tomorrow`, anything within a week in `week`.
    pub fn bucket(contests: Vec<Contest>, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let tomorrow = today + Duration::days(1);
        let week_end = today + Duration::days(Self::WEEK_DAYS);

        let mut schedule = Self::default();
        for contest in contests {
            let day = contest.start.date_naive();
            if day <= today {
                schedule.today.push(contest);
            } else if day == tomorrow {
                schedule.tomorrow.push(contest);
            } else if day <= week_end {
                schedule.week.push(contest);
            } else {
                schedule.upcoming.push(contest);
            }
        }

        for bucket in [
            &mut schedule.today,
            &mut schedule.tomorrow,
            &mut schedule.week,
            &mut schedule.upcoming,
        ] {
            bucket.sort_by_key(|c| c.start);
        }
        schedule
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.week.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contest(id: u64, start: DateTime<Utc>) -> Contest {
        Contest {
            id,
            event: format!("Round {}", id),
            host: "codeforces.com".into(),
            href: format!("https://codeforces.com/contest/{}", id),
            start,
            end: start + Duration::hours(2),
            duration: 7200,
        }
    }

    #[test]
    fn test_bucketing_by_utc_date() {
        let now = Utc.with_ymd_and_hms(2024, 1, 30, 22, 0, 0).unwrap();
        let contests = vec![
            contest(1, Utc.with_ymd_and_hms(2024, 1, 30, 23, 30, 0).unwrap()),
            contest(2, Utc.with_ymd_and_hms(2024, 1, 31, 0, 30, 0).unwrap()),
            contest(3, Utc.with_ymd_and_hms(2024, 2, 6, 12, 0, 0).unwrap()),
            contest(4, Utc.with_ymd_and_hms(2024, 2, 7, 12, 0, 0).unwrap()),
            contest(5, Utc.with_ymd_and_hms(2024, 1, 30, 20, 0, 0).unwrap()),
        ];

        let schedule = ContestSchedule::bucket(contests, now);
        let ids = |v: &Vec<Contest>| v.iter().map(|c| c.id).collect::<Vec<_>>();

        assert_eq!(ids(&schedule.today), vec![5, 1]);
        assert_eq!(ids(&schedule.tomorrow), vec![2]);
        assert_eq!(ids(&schedule.week), vec![3]);
        assert_eq!(ids(&schedule.upcoming), vec![4]);
        assert_eq!(schedule.len(), 5);
    }

    #[test]
    fn test_month_rollover() {
        // day-of-month comparison would put Feb 1 before Jan 31
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap();
        let schedule = ContestSchedule::bucket(
            vec![contest(1, Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap())],
            now,
        );
        assert_eq!(schedule.tomorrow.len(), 1);
    }
}
