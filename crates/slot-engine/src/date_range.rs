//! Calendar cycle computation.
//!
//! A generated schedule runs for one billing cycle: from the start date up to
//! and including the day before the same day-of-month in the following month.
//! All arithmetic goes through chrono, so month lengths and leap years are
//! handled by the calendar rather than by day counting.
//!
//! Nothing here reads the system clock. The "today" used for a default cycle
//! start is always passed in by the caller.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// The inclusive date span shared by every slot of one generated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CycleRange {
    /// Build the cycle beginning on `start`.
    pub fn starting(start: NaiveDate) -> Result<Self> {
        Ok(Self {
            start,
            end: cycle_end(start)?,
        })
    }

    /// Whether `date` falls inside the cycle (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Last day of the cycle starting on `start`: one calendar month later, minus
/// one day.
///
/// When the target month is shorter than the start's day-of-month, the month
/// step lands on that month's last day before the day is subtracted
/// (2024-01-31 → 2024-02-29 → 2024-02-28).
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] if the result would fall outside
/// chrono's representable range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::date_range::cycle_end;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// assert_eq!(cycle_end(start).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn cycle_end(start: NaiveDate) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or_else(|| ScheduleError::InvalidDate(format!("no cycle end for {start}")))
}

/// [`cycle_end`] on ISO `YYYY-MM-DD` strings.
pub fn cycle_end_str(start: &str) -> Result<String> {
    Ok(cycle_end(parse_date(start)?)?.format("%Y-%m-%d").to_string())
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ScheduleError::InvalidDate(format!("'{}': {}", s, e)))
}

/// The calendar date of `now` as seen in `timezone`.
///
/// Used to pick the default cycle start when none is configured.
pub fn local_date(now: DateTime<Utc>, timezone: &str) -> Result<NaiveDate> {
    let tz = parse_timezone(timezone)?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    // ── cycle_end tests ─────────────────────────────────────────────────

    #[test]
    fn test_cycle_end_thirty_one_day_month() {
        assert_eq!(cycle_end(d("2024-01-01")).unwrap(), d("2024-01-31"));
    }

    #[test]
    fn test_cycle_end_leap_february() {
        assert_eq!(cycle_end(d("2024-02-01")).unwrap(), d("2024-02-29"));
    }

    #[test]
    fn test_cycle_end_common_february() {
        assert_eq!(cycle_end(d("2023-02-01")).unwrap(), d("2023-02-28"));
    }

    #[test]
    fn test_cycle_end_mid_month() {
        assert_eq!(cycle_end(d("2024-03-15")).unwrap(), d("2024-04-14"));
    }

    #[test]
    fn test_cycle_end_year_rollover() {
        assert_eq!(cycle_end(d("2024-12-01")).unwrap(), d("2024-12-31"));
        assert_eq!(cycle_end(d("2024-12-20")).unwrap(), d("2025-01-19"));
    }

    #[test]
    fn test_cycle_end_clamps_short_target_month() {
        assert_eq!(cycle_end(d("2024-01-31")).unwrap(), d("2024-02-28"));
        assert_eq!(cycle_end(d("2023-01-31")).unwrap(), d("2023-02-27"));
        assert_eq!(cycle_end(d("2024-03-31")).unwrap(), d("2024-04-29"));
    }

    #[test]
    fn test_cycle_end_from_leap_day() {
        assert_eq!(cycle_end(d("2024-02-29")).unwrap(), d("2024-03-28"));
    }

    #[test]
    fn test_cycle_end_out_of_range() {
        let err = cycle_end(NaiveDate::MAX).unwrap_err();
        assert!(err.to_string().contains("Invalid date"), "got: {err}");
    }

    #[test]
    fn test_cycle_end_str() {
        assert_eq!(cycle_end_str("2024-01-01").unwrap(), "2024-01-31");
        assert!(cycle_end_str("01/01/2024").is_err());
    }

    // ── CycleRange tests ────────────────────────────────────────────────

    #[test]
    fn test_cycle_range_contains_both_ends() {
        let range = CycleRange::starting(d("2024-02-01")).unwrap();
        assert!(range.contains(d("2024-02-01")));
        assert!(range.contains(d("2024-02-29")));
        assert!(!range.contains(d("2024-03-01")));
        assert_eq!(range.len_days(), 29);
    }

    // ── local_date tests ────────────────────────────────────────────────

    #[test]
    fn test_local_date_respects_timezone() {
        // 2024-03-01 02:00 UTC is still Feb 29 in New York
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(local_date(now, "UTC").unwrap(), d("2024-03-01"));
        assert_eq!(local_date(now, "America/New_York").unwrap(), d("2024-02-29"));
    }

    #[test]
    fn test_local_date_invalid_timezone() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let err = local_date(now, "Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }
}
