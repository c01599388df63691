//! Chained batch slot generation.
//!
//! Given a slot count, a fixed duration and a grid-aligned opening time,
//! [`generate`] lays slots end to end: each slot starts exactly where the
//! previous one ended. The cycle date range is computed once and copied into
//! every slot.

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_range::CycleRange;
use crate::error::{Result, ScheduleError};
use crate::time_grid::{TimeOfDay, GRID_MINUTES, MINUTES_PER_DAY};

/// Most slots one generation may produce: one day of half-hour cells.
pub const MAX_BATCHES: u32 = (MINUTES_PER_DAY / GRID_MINUTES as i64) as u32;

/// One scheduled seating session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSlot {
    /// Ordinal label, `"Batch 1"` for the first slot.
    pub label: String,
    pub seat_capacity: u32,
    pub cycle_start_date: NaiveDate,
    pub cycle_end_date: NaiveDate,
    pub price: u32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl BatchSlot {
    /// Whether the stored end time is earlier in the day than the start time.
    ///
    /// Times carry no day offset, so this is the only sign that a slot runs
    /// past midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }
}

/// Inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Number of slots, at most [`MAX_BATCHES`].
    pub count: u32,
    /// Length of every slot; a multiple of 30.
    pub duration_minutes: u32,
    /// Seats copied into every slot.
    pub seat_capacity: u32,
    /// Must already be on the half-hour grid.
    pub open_time: TimeOfDay,
    /// First day of the cycle; the end is derived from it.
    pub cycle_start_date: NaiveDate,
    /// Initial price of every slot.
    pub price: u32,
}

/// Build the chained slot sequence for `request`.
///
/// A count of zero yields an empty sequence; more than [`MAX_BATCHES`] is
/// rejected before anything is allocated. A zero duration yields slots that
/// all start and end at `open_time`.
///
/// # Errors
///
/// Returns [`ScheduleError::TooManyBatches`] if the count exceeds
/// [`MAX_BATCHES`], [`ScheduleError::OffGridDuration`] if the duration is not a
/// multiple of 30 minutes, [`ScheduleError::InvalidTime`] if `open_time` is
/// off the grid, or [`ScheduleError::InvalidDate`] if the cycle end cannot be
/// computed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::generator::{generate, GenerateRequest};
/// use slot_engine::time_grid::TimeOfDay;
///
/// let slots = generate(&GenerateRequest {
///     count: 2,
///     duration_minutes: 90,
///     seat_capacity: 20,
///     open_time: TimeOfDay::parse("09:00").unwrap(),
///     cycle_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     price: 500,
/// })
/// .unwrap();
/// assert_eq!(slots[1].start_time.to_string(), "10:30");
/// assert_eq!(slots[1].end_time.to_string(), "12:00");
/// ```
pub fn generate(request: &GenerateRequest) -> Result<Vec<BatchSlot>> {
    if request.count > MAX_BATCHES {
        return Err(ScheduleError::TooManyBatches {
            count: request.count,
            max: MAX_BATCHES,
        });
    }
    if request.duration_minutes % GRID_MINUTES as u32 != 0 {
        return Err(ScheduleError::OffGridDuration(request.duration_minutes));
    }
    if !request.open_time.is_on_grid() {
        return Err(ScheduleError::InvalidTime(format!(
            "opening time {} is not on the half-hour grid",
            request.open_time
        )));
    }

    let cycle = CycleRange::starting(request.cycle_start_date)?;
    let step = request.duration_minutes as i64;

    let mut slots = Vec::with_capacity(request.count as usize);
    let mut cursor = request.open_time;
    for i in 1..=request.count {
        let end = cursor.add_minutes(step);
        slots.push(BatchSlot {
            label: format!("Batch {i}"),
            seat_capacity: request.seat_capacity,
            cycle_start_date: cycle.start,
            cycle_end_date: cycle.end,
            price: request.price,
            start_time: cursor,
            end_time: end,
        });
        cursor = end;
    }

    log::debug!(
        "generate: {} slots of {}m from {} ({} to {})",
        slots.len(),
        step,
        request.open_time,
        cycle.start,
        cycle.end
    );
    Ok(slots)
}

// ── Tests ───────────────────────────────────────────────────────────────────
