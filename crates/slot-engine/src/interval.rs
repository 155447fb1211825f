//! Half-open time intervals and the authoritative overlap predicate.
//!
//! Adjacent intervals (one ending exactly when another starts) do NOT
//! overlap: an appointment ending at 10:00 never conflicts with one starting
//! at 10:00. Every conflict decision in the crate goes through
//! [`Interval::overlaps`] — no other module reimplements the predicate, so
//! creation-time validation and availability queries cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// A half-open interval `[start, end)` within a single day.
///
/// Construction enforces `start < end`, so every `Interval` in the system has
/// positive duration; zero-length and inverted intervals are rejected before
/// they can reach overlap or slot-generation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

/// Unchecked shadow of [`Interval`] for serde, so deserialized intervals pass
/// through the same validation as constructed ones.
#[derive(Serialize, Deserialize)]
struct RawInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for Interval {
    type Error = SlotError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl From<Interval> for RawInterval {
    fn from(interval: Interval) -> Self {
        RawInterval {
            start: interval.start,
            end: interval.end,
        }
    }
}

impl Interval {
    /// Build an interval, rejecting `end <= start`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` for zero-length or inverted
    /// ranges. Reaching this error from within the crate indicates a caller
    /// bug, not a schedulable condition.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Interval { start, end })
    }

    /// Internal constructor for call sites that have already proven
    /// `start < end` (e.g. the slot ladder's loop condition).
    pub(crate) fn from_parts(start: TimeOfDay, end: TimeOfDay) -> Self {
        debug_assert!(start < end, "interval invariant violated: {start} >= {end}");
        Interval { start, end }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length in minutes. Always positive by construction.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes_since_midnight() - self.start.minutes_since_midnight()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Half-open semantics: the adjacent case `a.end == b.start` is excluded.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// True iff `candidate` overlaps none of `existing`.
///
/// An O(n) scan — per-business daily booking counts are tens, not thousands,
/// so sorting or an interval tree would not pay for itself. If volume ever
/// grows by orders of magnitude, replace this scan with an interval tree.
pub fn is_available(candidate: &Interval, existing: &[Interval]) -> bool {
    existing.iter().all(|busy| !candidate.overlaps(busy))
}
