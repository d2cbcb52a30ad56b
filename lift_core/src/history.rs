//! Session history summarization.
//!
//! Pure rollups over already-loaded session results: pick a time window,
//! optionally focus on one exercise, get counts, durations, and total
//! volume back. Loading and storing the results is the caller's business.

use crate::types::SessionResult;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Reporting window anchored at "now"
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryWindow {
    Today,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl HistoryWindow {
    /// Inclusive lower bound of the window, or None for all time.
    ///
    /// Weeks start on Monday.
    pub fn lower_bound(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start_of = |date: NaiveDate| date.and_time(NaiveTime::MIN).and_utc();

        match self {
            HistoryWindow::Today => Some(start_of(today)),
            HistoryWindow::Week => {
                let back = i64::from(today.weekday().num_days_from_monday());
                Some(start_of(today - Duration::days(back)))
            }
            HistoryWindow::Month => {
                NaiveDate::from_ymd_opt(today.year(), today.month(), 1).map(start_of)
            }
            HistoryWindow::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).map(start_of),
            HistoryWindow::All => None,
        }
    }
}

/// Rollup of the sessions inside a window
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub session_count: usize,
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub total_volume: f64,
}

/// Summarize `results` over `window`, ending at `now`.
///
/// `exercise_name` narrows the volume figure to one exercise; session
/// counts and durations always cover the whole session.
pub fn summarize(
    results: &[SessionResult],
    window: HistoryWindow,
    exercise_name: Option<&str>,
    now: DateTime<Utc>,
) -> HistorySummary {
    let lower = window.lower_bound(now);
    let in_window: Vec<&SessionResult> = results
        .iter()
        .filter(|r| lower.map_or(true, |lb| r.performed_at >= lb))
        .collect();

    let total_seconds: f64 = in_window.iter().map(|r| r.total_seconds).sum();
    let average_seconds = if in_window.is_empty() {
        0.0
    } else {
        total_seconds / in_window.len() as f64
    };

    let total_volume: f64 = in_window
        .iter()
        .flat_map(|r| r.exercises.iter())
        .filter(|e| exercise_name.map_or(true, |name| e.name == name))
        .map(|e| e.volume())
        .sum();

    tracing::debug!(
        "Summarized {} of {} sessions for window {:?}",
        in_window.len(),
        results.len(),
        window
    );

    HistorySummary {
        session_count: in_window.len(),
        total_seconds,
        average_seconds,
        total_volume,
    }
}
