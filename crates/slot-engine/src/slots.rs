//! Bookable slot enumeration within a work window.
//!
//! Steps through the window on a fixed grid and keeps every start time whose
//! service interval fits inside the window without touching an existing
//! booking. The ladder is recomputed on every query and never cached — the
//! booking set changes underneath it, and a stale ladder is exactly the kind
//! of staleness that produces double-bookings.

use crate::error::{Result, SlotError};
use crate::interval::{is_available, Interval};
use crate::time::TimeOfDay;

/// Default slot-offer granularity in minutes.
///
/// The step is independent of the service duration: a 90-minute service is
/// still offered at :00/:15/:30/:45 starts rather than only at 90-minute
/// boundaries, which packs the schedule tighter.
pub const DEFAULT_STEP_MINUTES: u16 = 15;

/// Enumerate bookable start times at the default 15-minute step.
///
/// Equivalent to [`generate_slots_with_step`] with [`DEFAULT_STEP_MINUTES`].
pub fn generate_slots(
    window: &Interval,
    service_duration_minutes: u32,
    existing: &[Interval],
) -> Vec<TimeOfDay> {
    ladder(window, service_duration_minutes, existing, DEFAULT_STEP_MINUTES)
}

/// Enumerate bookable start times at a caller-chosen step.
///
/// Starting at `window.start()`, candidates advance by `step_minutes`; a
/// candidate is kept when its service interval both fits inside the window
/// and overlaps no existing booking. A step that does not evenly divide the
/// window is fine — the ladder stops at the last start whose end still fits.
///
/// A service longer than the whole window yields an empty ladder, not an
/// error: "nothing bookable today" is an ordinary answer.
///
/// # Errors
/// Returns `SlotError::InvalidStep` when `step_minutes == 0`.
pub fn generate_slots_with_step(
    window: &Interval,
    service_duration_minutes: u32,
    existing: &[Interval],
    step_minutes: u16,
) -> Result<Vec<TimeOfDay>> {
    if step_minutes == 0 {
        return Err(SlotError::InvalidStep(step_minutes));
    }
    Ok(ladder(window, service_duration_minutes, existing, step_minutes))
}

fn ladder(
    window: &Interval,
    service_duration_minutes: u32,
    existing: &[Interval],
    step_minutes: u16,
) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();

    // A zero-length service can never form a valid booking interval.
    if service_duration_minutes == 0 {
        return slots;
    }

    let mut cursor = window.start();
    loop {
        // checked_add keeps the candidate end on the same day; a candidate
        // that would run past midnight can never fit the window either way.
        let Some(candidate_end) = cursor.checked_add_minutes(service_duration_minutes) else {
            break;
        };
        if candidate_end > window.end() {
            break;
        }

        // cursor < candidate_end holds: the duration is positive.
        let candidate = Interval::from_parts(cursor, candidate_end);
        if is_available(&candidate, existing) {
            slots.push(cursor);
        }

        match cursor.checked_add_minutes(u32::from(step_minutes)) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    slots
}
