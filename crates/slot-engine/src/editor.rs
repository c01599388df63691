//! The editable batch schedule.
//!
//! [`BatchSchedule`] owns the generated slot sequence, the per-slot
//! consistency flags, and the slot duration captured at generation time. It
//! is either empty or populated; generation swaps in a whole new sequence and
//! clears every flag, and each edit afterwards touches exactly one slot.
//!
//! # Edit rules
//!
//! - [`edit_start`](BatchSchedule::edit_start) snaps to the grid, clamps
//!   against the previous slot's end, flags the slot if it clamped, and moves
//!   the end to `start + duration`.
//! - [`edit_end`](BatchSchedule::edit_end) snaps and overwrites the end with
//!   no checks at all.
//! - [`edit_price`](BatchSchedule::edit_price) accepts digits only.
//!
//! Edits never look past the slot being edited. Moving slot `i` later can
//! leave slot `i + 1` starting before slot `i` ends; that slot is only checked
//! when it is edited itself.
//!
//! The start check compares minutes of the same day, so it is meaningless for
//! a sequence that has already wrapped past midnight.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{parse_non_negative, ScheduleConfig};
use crate::error::{Result, ScheduleError};
use crate::generator::{generate, BatchSlot, GenerateRequest};
use crate::time_grid::TimeOfDay;

/// Advisory marker attached to a slot whose start edit was clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyFlag {
    #[error("start time cannot precede previous slot's end time")]
    StartBeforePreviousEnd {
        proposed: TimeOfDay,
        previous_end: TimeOfDay,
    },
}

/// Whether a schedule holds any slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Empty,
    Populated,
}

/// Whether a slot currently carries a [`ConsistencyFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Valid,
    Flagged,
}

/// A generated slot sequence plus its per-slot consistency flags.
#[derive(Debug, Clone, Default)]
pub struct BatchSchedule {
    slots: Vec<BatchSlot>,
    flags: BTreeMap<usize, ConsistencyFlag>,
    duration_minutes: u32,
}

impl BatchSchedule {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    // ── generation ──────────────────────────────────────────────────────

    /// Replace the whole sequence with a freshly generated one.
    ///
    /// All flags are cleared. On error the current sequence and flags are
    /// left exactly as they were.
    pub fn generate(&mut self, request: &GenerateRequest) -> Result<&[BatchSlot]> {
        let slots = generate(request)?;
        self.slots = slots;
        self.flags.clear();
        self.duration_minutes = request.duration_minutes;
        Ok(&self.slots)
    }

    /// Generate from the form configuration, resolving "today" from `now`.
    pub fn generate_from_config(
        &mut self,
        config: &ScheduleConfig,
        now: DateTime<Utc>,
    ) -> Result<&[BatchSlot]> {
        let request = config.to_request(now)?;
        self.generate(&request)
    }

    /// Drop every slot and flag.
    pub fn clear(&mut self) {
        log::debug!("clear: dropping {} slots", self.slots.len());
        self.slots.clear();
        self.flags.clear();
    }

    // ── queries ─────────────────────────────────────────────────────────

    /// All slots, in sequence order.
    pub fn slots(&self) -> &[BatchSlot] {
        &self.slots
    }

    /// The slot at `index`, if any.
    pub fn slot(&self, index: usize) -> Option<&BatchSlot> {
        self.slots.get(index)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Empty or populated.
    pub fn state(&self) -> ScheduleState {
        if self.slots.is_empty() {
            ScheduleState::Empty
        } else {
            ScheduleState::Populated
        }
    }

    /// Slot duration in minutes, as captured by the last generation.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// The flag raised on slot `index`, if any.
    pub fn flag(&self, index: usize) -> Option<&ConsistencyFlag> {
        self.flags.get(&index)
    }

    /// All raised flags, in slot order.
    pub fn flags(&self) -> impl Iterator<Item = (usize, &ConsistencyFlag)> {
        self.flags.iter().map(|(i, f)| (*i, f))
    }

    /// Valid or flagged; `None` if `index` is out of range.
    pub fn slot_status(&self, index: usize) -> Option<SlotStatus> {
        self.slots.get(index).map(|_| self.status_of(index))
    }

    // ── edits ───────────────────────────────────────────────────────────

    /// Move the start of slot `index` to `proposed` (`HH:MM`).
    ///
    /// The proposal is snapped to the half-hour grid. If it falls before the
    /// previous slot's end it is clamped to that end and the slot is flagged;
    /// otherwise any existing flag on the slot is cleared. The end becomes
    /// `start + duration`. Empty input leaves the slot untouched.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::SlotIndexOutOfRange`] or [`ScheduleError::InvalidTime`];
    /// nothing is changed in either case.
    pub fn edit_start(&mut self, index: usize, proposed: &str) -> Result<SlotStatus> {
        self.check_index(index)?;
        let Some(snapped) = parse_snapped(proposed)? else {
            return Ok(self.status_of(index));
        };

        let previous_end = index
            .checked_sub(1)
            .and_then(|prev| self.slots.get(prev))
            .map(|slot| slot.end_time);

        let start = match previous_end {
            Some(previous_end) if snapped.minutes() < previous_end.minutes() => {
                log::warn!(
                    "edit_start: slot {} start {} precedes previous end {}, clamping",
                    index,
                    snapped,
                    previous_end
                );
                self.flags.insert(
                    index,
                    ConsistencyFlag::StartBeforePreviousEnd {
                        proposed: snapped,
                        previous_end,
                    },
                );
                previous_end
            }
            _ => {
                self.flags.remove(&index);
                snapped
            }
        };

        let slot = &mut self.slots[index];
        slot.start_time = start;
        slot.end_time = start.add_minutes(self.duration_minutes as i64);
        log::debug!(
            "edit_start: slot {} now {}-{}",
            index,
            slot.start_time,
            slot.end_time
        );
        Ok(self.status_of(index))
    }

    /// Overwrite the end of slot `index` with `proposed` snapped to the grid.
    ///
    /// No duration or neighbour check is made and flags are not touched.
    /// Empty input leaves the slot untouched.
    pub fn edit_end(&mut self, index: usize, proposed: &str) -> Result<()> {
        self.check_index(index)?;
        if let Some(snapped) = parse_snapped(proposed)? {
            self.slots[index].end_time = snapped;
            log::debug!("edit_end: slot {} end now {}", index, snapped);
        }
        Ok(())
    }

    /// Set the price of slot `index` from raw text.
    ///
    /// Only digits are accepted (empty text means 0). Anything else is
    /// rejected with [`ScheduleError::Format`] and the old price stays.
    pub fn edit_price(&mut self, index: usize, raw: &str) -> Result<()> {
        self.check_index(index)?;
        let price = parse_non_negative("price", raw)?;
        self.slots[index].price = price;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ScheduleError::SlotIndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    fn status_of(&self, index: usize) -> SlotStatus {
        if self.flags.contains_key(&index) {
            SlotStatus::Flagged
        } else {
            SlotStatus::Valid
        }
    }
}

/// Parse and snap a time field; `None` for an empty field.
fn parse_snapped(raw: &str) -> Result<Option<TimeOfDay>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(TimeOfDay::parse(raw)?.snap_to_half_hour()))
}

// ── Tests ───────────────────────────────────────────────────────────────────
