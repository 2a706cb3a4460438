//! Daily streak computation over activity log dates.
//!
//! A day counts toward the streak when it has at least one workout or
//! meditation log entry. The current streak survives until a full day is
//! missed: a run ending yesterday is still "current" because today may not
//! be over.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Consecutive active days ending today or yesterday.
    pub current: u32,
    /// Longest consecutive run ever.
    pub best: u32,
}

/// Compute streaks from (possibly duplicated, unordered) log dates.
pub fn compute_streaks(dates: &[NaiveDate], today: NaiveDate) -> StreakStats {
    let days: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    if days.is_empty() {
        return StreakStats::default();
    }

    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in &days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }

    let mut current = 0u32;
    let mut cursor = if days.contains(&today) {
        Some(today)
    } else {
        today.checked_sub_days(Days::new(1)).filter(|d| days.contains(d))
    };
    while let Some(day) = cursor {
        current += 1;
        cursor = day.checked_sub_days(Days::new(1)).filter(|d| days.contains(d));
    }

    StreakStats { current, best }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_log_has_no_streak() {
        assert_eq!(
            compute_streaks(&[], d("2026-08-27")),
            StreakStats::default()
        );
    }

    #[test]
    fn run_ending_today() {
        let dates = [d("2026-08-25"), d("2026-08-26"), d("2026-08-27")];
        let s = compute_streaks(&dates, d("2026-08-27"));
        assert_eq!(s.current, 3);
        assert_eq!(s.best, 3);
    }

    #[test]
    fn run_ending_yesterday_still_counts() {
        let dates = [d("2026-08-25"), d("2026-08-26")];
        let s = compute_streaks(&dates, d("2026-08-27"));
        assert_eq!(s.current, 2);
    }

    #[test]
    fn gap_of_a_full_day_breaks_the_streak() {
        let dates = [d("2026-08-24"), d("2026-08-25")];
        let s = compute_streaks(&dates, d("2026-08-27"));
        assert_eq!(s.current, 0);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn best_tracks_an_older_longer_run() {
        let dates = [
            d("2026-08-10"),
            d("2026-08-11"),
            d("2026-08-12"),
            d("2026-08-13"),
            d("2026-08-27"),
        ];
        let s = compute_streaks(&dates, d("2026-08-27"));
        assert_eq!(s.current, 1);
        assert_eq!(s.best, 4);
    }

    #[test]
    fn duplicate_dates_collapse() {
        let dates = [d("2026-08-27"), d("2026-08-27"), d("2026-08-26")];
        let s = compute_streaks(&dates, d("2026-08-27"));
        assert_eq!(s.current, 2);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn month_boundary_is_consecutive() {
        let dates = [d("2026-07-31"), d("2026-08-01")];
        let s = compute_streaks(&dates, d("2026-08-01"));
        assert_eq!(s.current, 2);
    }
}
