//! activity.rs
//!
//! Calendar helpers for commit activity:
//!     * the `[now - days, now]` window a snapshot covers
//!     * per-day commit counts over the last N days
//!
//! Days are UTC calendar dates of the commit *author* date, which is what
//! the API reports and what `since` filters on. Days with no commits are
//! still emitted (count 0) so the series is always exactly N entries long.

use crate::config::MAX_WINDOW_DAYS;
use crate::types::Commit;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Time range covered by a windowed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub days: u32,
}

impl DateWindow {
    /// Window of `days` days ending at `to`.
    ///
    /// `days` is clamped to [`MAX_WINDOW_DAYS`], and `from` never goes below
    /// the earliest representable instant.
    pub fn ending(to: DateTime<Utc>, days: u32) -> Self {
        let days = days.min(MAX_WINDOW_DAYS);
        let from = to
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { from, to, days }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }

    /// `YYYY-MM-DD to YYYY-MM-DD`
    pub fn date_span(&self) -> String {
        format!(
            "{} to {}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub commits: usize,
}

/// Commit counts for each of the `days` days ending at `today`, oldest first.
///
/// `days` is clamped to [`MAX_WINDOW_DAYS`].
pub fn daily_commit_counts(commits: &[Commit], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for commit in commits {
        *per_day
            .entry(commit.commit.author.date.date_naive())
            .or_default() += 1;
    }

    (0..i64::from(days.min(MAX_WINDOW_DAYS)))
        .rev()
        .filter_map(|back| today.checked_sub_signed(Duration::days(back)))
        .map(|date| DailyCount {
            date,
            commits: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Day with the most commits; earliest wins ties. `None` if every day is zero.
pub fn busiest_day(counts: &[DailyCount]) -> Option<DailyCount> {
    counts
        .iter()
        .filter(|c| c.commits > 0)
        .fold(None, |best: Option<DailyCount>, c| match best {
            Some(b) if b.commits >= c.commits => Some(b),
            _ => Some(*c),
        })
}
