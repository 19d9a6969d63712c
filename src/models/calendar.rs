//! Calendar date windows.
//!
//! Task windows and load horizons are inclusive ranges of calendar days.
//!
//! # Time Model
//! All dates are `chrono::NaiveDate`. A window `[start, end]` includes both
//! ends, so a window whose start equals its end spans exactly one day.
//!
//! # Clamping
//! A window is never empty. Constructing one with `end < start` clamps the
//! end to the start.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returns every date from `d0` to `d1` inclusive.
///
/// If `d1 < d0`, returns the single date `d0`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_staffing::models::inclusive_date_range;
///
/// let d0 = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
/// let d1 = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// assert_eq!(inclusive_date_range(d0, d1).len(), 3);
/// assert_eq!(inclusive_date_range(d1, d0), vec![d1]);
/// ```
pub fn inclusive_date_range(d0: NaiveDate, d1: NaiveDate) -> Vec<NaiveDate> {
    if d1 < d0 {
        return vec![d0];
    }
    d0.iter_days().take_while(|d| *d <= d1).collect()
}

/// An inclusive window of calendar days `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, clamping `end` to `start` if it precedes it.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// A one-day window.
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Smallest window covering both `a` and `b`.
    pub fn span(a: &Self, b: &Self) -> Self {
        Self::new(a.start.min(b.start), a.end.max(b.end))
    }

    /// Number of days in the window (always >= 1, matching [`days`](Self::days)).
    #[inline]
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize + 1
    }

    /// Every day in the window, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        inclusive_date_range(self.start, self.end)
    }

    /// Whether a date falls within the window.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Whether two windows share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The same window moved `days` later.
    ///
    /// Saturates at the last representable date.
    pub fn shifted(&self, days: u32) -> Self {
        let shift = Days::new(u64::from(days));
        Self {
            start: self.start.checked_add_days(shift).unwrap_or(NaiveDate::MAX),
            end: self.end.checked_add_days(shift).unwrap_or(NaiveDate::MAX),
        }
    }
}
