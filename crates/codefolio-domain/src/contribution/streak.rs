use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::series::DailyCount;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current_streak_length: u32,
    pub current_streak_start: Option<NaiveDate>,
    pub longest_streak_length: u32,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
    pub total_contributions: u64,
}

#[derive(Default)]
struct RunningStreak {
    length: u32,
    start: Option<NaiveDate>,
    last_active: Option<NaiveDate>,
}

/// Current and longest runs of consecutive active days over a chronological
/// daily series. A zero-count day or a missing calendar day ends a run.
pub fn calculate_streaks(days: &[DailyCount]) -> StreakSummary {
    let mut summary = StreakSummary::default();
    let mut running = RunningStreak::default();
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        summary.total_contributions += day.count;

        let contiguous = previous.is_none_or(|prev| prev.succ_opt() == Some(day.date));
        if !contiguous && running.length > 0 {
            close_streak(&mut summary, &mut running);
        }

        if day.count > 0 {
            if running.length == 0 {
                running.start = Some(day.date);
            }
            running.length += 1;
            running.last_active = Some(day.date);
        } else if running.length > 0 {
            close_streak(&mut summary, &mut running);
        }

        previous = Some(day.date);
    }

    // the best run may still be open when the series ends
    if running.length > summary.longest_streak_length {
        summary.longest_streak_length = running.length;
        summary.longest_streak_start = running.start;
        summary.longest_streak_end = running.last_active;
    }

    summary.current_streak_length = running.length;
    summary.current_streak_start = running.start;

    debug!(
        "[streak] days={} current={} longest={} total={}",
        days.len(),
        summary.current_streak_length,
        summary.longest_streak_length,
        summary.total_contributions
    );

    summary
}

fn close_streak(summary: &mut StreakSummary, running: &mut RunningStreak) {
    if running.length > summary.longest_streak_length {
        summary.longest_streak_length = running.length;
        summary.longest_streak_start = running.start;
        summary.longest_streak_end = running.last_active;
    }
    *running = RunningStreak::default();
}
