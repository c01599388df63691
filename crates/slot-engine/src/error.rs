//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Non-numeric input where a non-negative integer is required.
    #[error("Invalid {field}: '{value}' is not a non-negative integer")]
    Format { field: &'static str, value: String },

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Cannot generate {count} batches, at most {max} fit in one day")]
    TooManyBatches { count: u32, max: u32 },

    #[error("Duration of {0} minutes is not a multiple of 30")]
    OffGridDuration(u32),

    #[error("Slot index {index} out of range for schedule of {len} slots")]
    SlotIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
