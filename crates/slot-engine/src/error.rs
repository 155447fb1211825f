//! Error types for slot-engine operations.

use thiserror::Error;

use crate::time::TimeOfDay;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    #[error("Invalid slot step: {0} minutes")]
    InvalidStep(u16),
}

pub type Result<T> = std::result::Result<T, SlotError>;
