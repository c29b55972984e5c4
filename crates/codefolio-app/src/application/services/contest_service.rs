use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::application::dtos::ContestScheduleDto;
use codefolio_domain::contest::ContestSchedule;
use codefolio_domain::providers::ContestFeed;

/// Upcoming contests from the listing feed, grouped by start date
pub struct ContestService {
    feed: Arc<dyn ContestFeed>,
}

impl ContestService {
    pub fn new(feed: Arc<dyn ContestFeed>) -> Self {
        Self { feed }
    }

    pub async fn schedule(&self) -> ContestScheduleDto {
        self.schedule_at(Utc::now()).await
    }

    /// A feed failure yields empty buckets rather than an error
    pub async fn schedule_at(&self, now: DateTime<Utc>) -> ContestScheduleDto {
        match self.feed.upcoming_contests().await {
            Ok(contests) => ContestSchedule::bucket(contests, now).into(),
            Err(e) => {
                warn!("Contest feed unavailable: {}", e);
                ContestScheduleDto::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use codefolio_domain::contest::Contest;
    use codefolio_domain::shared::DomainError;
    use mockall::mock;

    mock! {
        Feed {}

        #[async_trait]
        impl ContestFeed for Feed {
            async fn upcoming_contests(&self) -> Result<Vec<Contest>, DomainError>;
        }
    }

    fn contest(id: u64, start: DateTime<Utc>) -> Contest {
        Contest {
            id,
            event: format!("Contest {}", id),
            host: "atcoder.jp".to_string(),
            href: format!("https://atcoder.jp/contests/abc{}", id),
            start,
            end: start + Duration::minutes(100),
            duration: 6000,
        }
    }

    #[tokio::test]
    async fn test_contests_are_bucketed() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let mut feed = MockFeed::new();
        feed.expect_upcoming_contests().times(1).returning(move || {
            Ok(vec![
                contest(1, now + Duration::hours(3)),
                contest(2, now + Duration::days(1)),
                contest(3, now + Duration::days(5)),
                contest(4, now + Duration::days(30)),
            ])
        });

        let schedule = ContestService::new(Arc::new(feed)).schedule_at(now).await;
        assert_eq!(schedule.today[0].id, 1);
        assert_eq!(schedule.tomorrow[0].id, 2);
        assert_eq!(schedule.week[0].id, 3);
        assert_eq!(schedule.upcoming[0].id, 4);
    }

    #[tokio::test]
    async fn test_feed_failure_gives_empty_schedule() {
        let mut feed = MockFeed::new();
        feed.expect_upcoming_contests()
            .returning(|| Err(DomainError::Infrastructure("clist.by returned 503".into())));

        let schedule = ContestService::new(Arc::new(feed)).schedule().await;
        assert!(schedule.today.is_empty());
        assert!(schedule.tomorrow.is_empty());
        assert!(schedule.week.is_empty());
        assert!(schedule.upcoming.is_empty());
    }
}
