//! # slot-engine
//!
//! Batch time-slot scheduling for seat-based facilities.
//!
//! Given a number of sequential sessions, a fixed duration, an opening time
//! and a cycle start date, the engine lays out a contiguous, non-overlapping
//! run of half-hour-aligned slots and then lets an operator adjust single
//! slots, checking each start against the slot before it.
//!
//! ## Modules
//!
//! - [`time_grid`]: Minute-of-day conversion, wraparound and half-hour snapping
//! - [`date_range`]: Month-long cycle end dates and the injected "today"
//! - [`generator`]: [`BatchSlot`] and chained sequence generation
//! - [`editor`]: [`BatchSchedule`], the editable sequence with consistency flags
//! - [`config`]: Generator form values, defaults and raw-input setters
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{BatchSchedule, ScheduleConfig, SlotStatus};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let mut schedule = BatchSchedule::new();
//! schedule.generate_from_config(&ScheduleConfig::default(), now).unwrap();
//! assert_eq!(schedule.len(), 4);
//!
//! // 09:00 is before slot 1's end (10:00), so it is clamped and flagged.
//! assert_eq!(schedule.edit_start(2, "09:00").unwrap(), SlotStatus::Flagged);
//! assert_eq!(schedule.slot(2).unwrap().start_time.to_string(), "10:00");
//! ```

pub mod config;
pub mod date_range;
pub mod editor;
pub mod error;
pub mod generator;
pub mod time_grid;

pub use config::ScheduleConfig;
pub use date_range::{cycle_end, CycleRange};
pub use editor::{BatchSchedule, ConsistencyFlag, ScheduleState, SlotStatus};
pub use error::ScheduleError;
pub use generator::{generate, BatchSlot, GenerateRequest};
pub use time_grid::TimeOfDay;
