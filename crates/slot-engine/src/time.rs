//! Minute-granularity time-of-day arithmetic.
//!
//! Every comparison and every piece of arithmetic goes through the canonical
//! minutes-since-midnight representation. The `"HH:MM"` string form exists
//! only at the serialization boundary, so string-comparison bugs cannot creep
//! into scheduling decisions.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Minutes in a 24-hour day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A minute-granular point in the 24-hour cycle, e.g. `09:30`.
///
/// Carries no date and no timezone — times are always local to the business's
/// configured timezone, which the caller resolves before reaching this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// 00:00, the start of the day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

    /// Build from an hour/minute pair.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` when `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(TimeOfDay {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Build from the canonical minutes-since-midnight representation.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` when `minutes >= 1440`.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!("{minutes} minutes")));
        }
        Ok(TimeOfDay { minutes })
    }

    /// Minutes elapsed since midnight. The canonical representation.
    pub fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Add minutes without wrapping past midnight.
    ///
    /// Returns `None` when the result would reach or pass 24:00. Wrap-around
    /// is never meaningful for same-day scheduling: callers either
    /// pre-validate against the work-window end or map `None` to a rejection,
    /// so a silently wrapped end time can never corrupt an overlap check.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<TimeOfDay> {
        let total = u32::from(self.minutes).checked_add(minutes)?;
        if total >= u32::from(MINUTES_PER_DAY) {
            return None;
        }
        Some(TimeOfDay {
            minutes: total as u16,
        })
    }

    /// Minutes from `self` forward to `end`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` when `end <= self` — a zero or
    /// negative span never describes a valid appointment.
    pub fn duration_until(self, end: TimeOfDay) -> Result<u16> {
        if end <= self {
            return Err(SlotError::InvalidInterval { start: self, end });
        }
        Ok(end.minutes - self.minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse the `"HH:MM"` form used throughout booking APIs.
    ///
    /// A single-digit hour (`"9:30"`) is accepted; the minute field must be
    /// exactly two digits.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(s.to_string());

        let (hour_part, minute_part) = s.split_once(':').ok_or_else(invalid)?;
        if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() != 2 {
            return Err(invalid());
        }

        let hour: u8 = hour_part.parse().map_err(|_| invalid())?;
        let minute: u8 = minute_part.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
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
        s.parse().map_err(de::Error::custom)
    }
}
