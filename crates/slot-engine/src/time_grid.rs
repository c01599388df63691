//! Minute-of-day arithmetic on a half-hour grid.
//!
//! Every time handled by the scheduler is a wall-clock time of day with no
//! date attached. Values are stored as minutes since midnight in `[0, 1440)`
//! and rendered as `HH:MM`.
//!
//! # Functions
//!
//! - [`snap_to_half_hour`]: Round an `HH:MM` string to the nearest 30-minute boundary
//! - [`to_minutes`]: `HH:MM` → minutes since midnight
//! - [`from_minutes`]: Minutes (any integer) → normalized `HH:MM`
//! - [`add_minutes`]: Shift an `HH:MM` string, wrapping silently across midnight
//!
//! The same operations are available on the [`TimeOfDay`] value type, which
//! is what the generator and editor use internally.
//!
//! # Midnight
//!
//! Arithmetic wraps modulo one day and keeps no day-rollover marker, so
//! `23:30 + 60m` is `00:30`. Callers that care whether an interval crosses
//! midnight must compare start and end themselves.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ScheduleError};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Width of one grid cell in minutes.
pub const GRID_MINUTES: u16 = 30;

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time of day with minute precision.
///
/// Always in `[00:00, 23:59]`. Ordering is same-day minute ordering, so
/// `00:30 < 23:30` even when the `00:30` is meant as "after midnight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    /// Build from a minute total, normalizing modulo one day.
    ///
    /// Negative totals count back from midnight: `-30` is `23:30`.
    pub fn from_minutes(total: i64) -> Self {
        Self(total.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Parse `HH:MM` (or `HH:MM:SS`, seconds discarded).
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTime`] for anything else, including
    /// the empty string.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map_err(|e| ScheduleError::InvalidTime(format!("'{}': {}", s, e)))?;
        Ok(Self::from(time))
    }

    /// Minutes since midnight, in `[0, 1440)`.
    #[inline]
    pub fn minutes(self) -> i64 {
        self.0 as i64
    }

    #[inline]
    pub fn hour(self) -> u32 {
        (self.0 / 60) as u32
    }

    #[inline]
    pub fn minute(self) -> u32 {
        (self.0 % 60) as u32
    }

    /// Shift by `delta` minutes, wrapping across midnight.
    ///
    /// Any `i64` delta is accepted; it is reduced modulo one day first.
    pub fn add_minutes(self, delta: i64) -> Self {
        Self::from_minutes(self.minutes() + delta.rem_euclid(MINUTES_PER_DAY))
    }

    /// Round the minute component to the nearest multiple of 30.
    ///
    /// Minutes 0-14 round down to `:00`, 15-44 to `:30`, and 45-59 carry into
    /// the next hour (`23:45` becomes `00:00`).
    pub fn snap_to_half_hour(self) -> Self {
        let grid = GRID_MINUTES as u32;
        let rounded = (self.minute() + grid / 2) / grid * grid;
        Self::from_minutes((self.hour() * 60 + rounded) as i64)
    }

    /// Whether this time already sits on a half-hour boundary.
    #[inline]
    pub fn is_on_grid(self) -> bool {
        self.0 % GRID_MINUTES == 0
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ── String-level operations ─────────────────────────────────────────────────

/// Snap an `HH:MM` string to the half-hour grid.
///
/// Empty (or all-whitespace) input is returned unchanged; an unset field is
/// not an error.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTime`] if a non-empty value is not `HH:MM`.
///
/// # Examples
///
/// ```
/// use slot_engine::time_grid::snap_to_half_hour;
///
/// assert_eq!(snap_to_half_hour("07:44").unwrap(), "07:30");
/// assert_eq!(snap_to_half_hour("07:45").unwrap(), "08:00");
/// assert_eq!(snap_to_half_hour("").unwrap(), "");
/// ```
pub fn snap_to_half_hour(value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Ok(value.to_string());
    }
    Ok(TimeOfDay::parse(value)?.snap_to_half_hour().to_string())
}

/// Convert `HH:MM` to minutes since midnight.
pub fn to_minutes(value: &str) -> Result<i64> {
    Ok(TimeOfDay::parse(value)?.minutes())
}

/// Convert any minute total to a normalized `HH:MM`.
pub fn from_minutes(total: i64) -> String {
    TimeOfDay::from_minutes(total).to_string()
}

/// Add `delta` minutes to an `HH:MM` string, wrapping across midnight.
///
/// ```
/// use slot_engine::time_grid::add_minutes;
///
/// assert_eq!(add_minutes("23:30", 60).unwrap(), "00:30");
/// ```
pub fn add_minutes(value: &str, delta: i64) -> Result<String> {
    Ok(TimeOfDay::parse(value)?.add_minutes(delta).to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
