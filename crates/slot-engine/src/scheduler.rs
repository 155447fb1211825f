//! Booking request validation — the single choke-point through which every
//! appointment creation and reschedule must pass.
//!
//! [`validate_booking`] is pure: callers fetch the work window and the active
//! bookings beforehand and persist the accepted interval afterwards. Purity
//! is what makes the decision fully unit-testable without a database. Each
//! failure maps to a distinct [`RejectionReason`] so the web layer can return
//! a precise user-facing message.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::interval::{is_available, Interval};
use crate::time::TimeOfDay;

/// Opaque identifier of a persisted booking.
///
/// Only ever compared for equality, so a reschedule can exclude the booking
/// being moved from its own conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub i64);

/// A business's open hours for one weekday.
///
/// Created and edited by business-settings administration; read-only here.
/// An inactive window means the business is closed that day even though a
/// schedule row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub day_of_week: Weekday,
    pub window: Interval,
    pub is_active: bool,
}

/// A booking already on the calendar, tagged with its identifier.
///
/// Sourced from the booking store filtered to one business, one calendar
/// date, and schedule-occupying statuses only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub id: BookingId,
    pub interval: Interval,
}

/// A single booking attempt. Transient — built per API call, never persisted
/// by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub desired_start: TimeOfDay,
    pub service_duration_minutes: u32,
    /// When moving an existing appointment, its id — excluded from the
    /// conflict check so the appointment cannot collide with itself.
    pub exclude_booking_id: Option<BookingId>,
}

/// Why a booking request was refused. Every variant is an expected,
/// caller-recoverable outcome the web layer turns into an HTTP 400 with a
/// localized message — never an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The business has no active work schedule on the requested weekday.
    NoWorkScheduleForDay,
    /// The appointment starts before or ends after the work window.
    OutsideWorkingHours,
    /// The requested interval overlaps an existing active booking.
    SlotAlreadyBooked,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectionReason::NoWorkScheduleForDay => "no work schedule configured for this day",
            RejectionReason::OutsideWorkingHours => "the appointment is outside working hours",
            RejectionReason::SlotAlreadyBooked => "the time slot is already booked",
        };
        f.write_str(msg)
    }
}

/// The validated start/end pair the caller should persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedBooking {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Validate a booking request against the work window and the active
/// bookings, short-circuiting on the first failure.
///
/// The sequence:
/// 1. no window, or an inactive one → [`RejectionReason::NoWorkScheduleForDay`]
/// 2. end time computed from start + duration; a request that would run to
///    or past midnight, start before the window opens, or end after it
///    closes → [`RejectionReason::OutsideWorkingHours`]
/// 3. overlap against the remaining bookings (minus `exclude_booking_id`)
///    → [`RejectionReason::SlotAlreadyBooked`]
///
/// This function performs no I/O and holds no state. Two calls validating
/// the same slot against the same snapshot of `existing` both accept — the
/// storage layer must close that check-then-act race with a transactional
/// uniqueness check or a per-business-per-date lock held across check and
/// insert.
pub fn validate_booking(
    request: &BookingRequest,
    work_window: Option<&WorkWindow>,
    existing: &[ExistingBooking],
) -> Result<AcceptedBooking, RejectionReason> {
    let window = match work_window {
        Some(w) if w.is_active => w,
        _ => return Err(RejectionReason::NoWorkScheduleForDay),
    };

    let candidate_end = request
        .desired_start
        .checked_add_minutes(request.service_duration_minutes)
        .ok_or(RejectionReason::OutsideWorkingHours)?;

    if request.desired_start < window.window.start() || candidate_end > window.window.end() {
        return Err(RejectionReason::OutsideWorkingHours);
    }

    // A zero-duration service cannot form a bookable interval.
    let candidate = Interval::new(request.desired_start, candidate_end)
        .map_err(|_| RejectionReason::OutsideWorkingHours)?;

    let busy: Vec<Interval> = existing
        .iter()
        .filter(|booking| Some(booking.id) != request.exclude_booking_id)
        .map(|booking| booking.interval)
        .collect();

    if !is_available(&candidate, &busy) {
        return Err(RejectionReason::SlotAlreadyBooked);
    }

    Ok(AcceptedBooking {
        start: request.desired_start,
        end: candidate_end,
    })
}
