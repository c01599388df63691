//! Generator form configuration.
//!
//! [`ScheduleConfig`] holds the values an operator fills in before pressing
//! "generate": how many batches, how long each runs, seats, price, the
//! facility opening time and the cycle start date. It deserializes from JSON
//! with every field optional, and exposes setters that take raw form text.
//!
//! # Raw input
//!
//! Numeric fields accept digits only. An empty field reads as 0; anything else
//! is rejected with [`ScheduleError::Format`] and the previous value is kept.
//! The opening time is snapped to the half-hour grid as soon as it is set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::date_range::{cycle_end, local_date, parse_timezone};
use crate::error::{Result, ScheduleError};
use crate::generator::GenerateRequest;
use crate::time_grid::TimeOfDay;

/// The generator form, with the defaults an operator first sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Number of batches to generate.
    pub total_batches: u32,
    /// Length of each batch in whole hours.
    pub duration_hours: u32,
    /// Seat capacity of each batch.
    pub seats_per_batch: u32,
    /// Opening time of the facility; the first batch starts here.
    pub facility_open_time: TimeOfDay,
    /// `None` means "today" in [`timezone`](Self::timezone).
    pub cycle_start_date: Option<NaiveDate>,
    /// Initial price of each batch.
    pub price: u32,
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            total_batches: 4,
            duration_hours: 2,
            seats_per_batch: 50,
            facility_open_time: TimeOfDay::from_minutes(6 * 60),
            cycle_start_date: None,
            price: 1000,
            timezone: "UTC".to_string(),
        }
    }
}

impl ScheduleConfig {
    /// Load from a JSON document; missing fields take their defaults.
    ///
    /// The opening time is snapped and the timezone validated on load.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| ScheduleError::InvalidConfig(e.to_string()))?;
        parse_timezone(&config.timezone)?;
        config.facility_open_time = config.facility_open_time.snap_to_half_hour();
        log::debug!("config: loaded {:?}", config);
        Ok(config)
    }

    // ── form setters ────────────────────────────────────────────────────

    /// Set the batch count from raw digits.
    pub fn set_total_batches(&mut self, raw: &str) -> Result<()> {
        self.total_batches = parse_non_negative("total batches", raw)?;
        Ok(())
    }

    /// Set the batch length in hours from raw digits.
    pub fn set_duration_hours(&mut self, raw: &str) -> Result<()> {
        self.duration_hours = parse_non_negative("duration", raw)?;
        Ok(())
    }

    /// Set the seat capacity from raw digits.
    pub fn set_seats_per_batch(&mut self, raw: &str) -> Result<()> {
        self.seats_per_batch = parse_non_negative("seat capacity", raw)?;
        Ok(())
    }

    /// Set the initial price from raw digits.
    pub fn set_price(&mut self, raw: &str) -> Result<()> {
        self.price = parse_non_negative("price", raw)?;
        Ok(())
    }

    /// Set the opening time from `HH:MM`, snapped to the grid.
    ///
    /// An empty field leaves the current value in place.
    pub fn set_facility_open_time(&mut self, raw: &str) -> Result<()> {
        if raw.trim().is_empty() {
            return Ok(());
        }
        self.facility_open_time = TimeOfDay::parse(raw)?.snap_to_half_hour();
        Ok(())
    }

    /// Pin the cycle start instead of using today.
    pub fn set_cycle_start_date(&mut self, date: NaiveDate) {
        self.cycle_start_date = Some(date);
    }

    // ── derived values ──────────────────────────────────────────────────

    /// The configured cycle start, or today's date in the configured timezone.
    pub fn resolve_start_date(&self, now: DateTime<Utc>) -> Result<NaiveDate> {
        match self.cycle_start_date {
            Some(date) => Ok(date),
            None => local_date(now, &self.timezone),
        }
    }

    /// The read-only cycle end shown next to the start date.
    pub fn cycle_end_preview(&self, now: DateTime<Utc>) -> Result<NaiveDate> {
        cycle_end(self.resolve_start_date(now)?)
    }

    /// Turn the form into a generation request.
    pub fn to_request(&self, now: DateTime<Utc>) -> Result<GenerateRequest> {
        let duration_minutes = self
            .duration_hours
            .checked_mul(60)
            .ok_or_else(|| ScheduleError::Format {
                field: "duration",
                value: self.duration_hours.to_string(),
            })?;
        Ok(GenerateRequest {
            count: self.total_batches,
            duration_minutes,
            seat_capacity: self.seats_per_batch,
            open_time: self.facility_open_time.snap_to_half_hour(),
            cycle_start_date: self.resolve_start_date(now)?,
            price: self.price,
        })
    }
}

/// Parse a digits-only form field. Empty reads as 0.
pub(crate) fn parse_non_negative(field: &'static str, raw: &str) -> Result<u32> {
    if raw.is_empty() {
        return Ok(0);
    }
    let reject = || {
        log::debug!("rejected {} input '{}'", field, raw);
        ScheduleError::Format {
            field,
            value: raw.to_string(),
        }
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject());
    }
    raw.parse::<u32>().map_err(|_| reject())
}

// ── Tests ───────────────────────────────────────────────────────────────────
