//! Repository seams and the appointment status model.
//!
//! The engine owns no persistent state. Hosts implement these traits over
//! their storage and hand them to [`Scheduler`]; connection lifecycle
//! (connect/disconnect, pooling) belongs to the host process, never to this
//! crate. The hash-map stores at the bottom are reference implementations
//! used by the integration tests and by hosts that want database-free tests
//! of their own.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::scheduler::{
    validate_booking, AcceptedBooking, BookingRequest, ExistingBooking, RejectionReason,
    WorkWindow,
};
use crate::slots::generate_slots;
use crate::time::TimeOfDay;

/// Lifecycle states of an appointment.
///
/// `Scheduled → Confirmed → Completed`, or `Cancelled`/`NoShow` out of either
/// active state. Serialized in the SCREAMING_SNAKE_CASE form booking
/// databases conventionally store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// The statuses that occupy the schedule for conflict purposes.
    ///
    /// This is the single place that decision lives; booking repositories
    /// filter with it instead of each call site hard-coding a status list.
    pub const ACTIVE: [AppointmentStatus; 2] =
        [AppointmentStatus::Scheduled, AppointmentStatus::Confirmed];

    /// Whether a booking in this status blocks other bookings.
    pub fn occupies_schedule(self) -> bool {
        Self::ACTIVE.contains(&self)
    }
}

/// Identifier of a tenant business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub i64);

/// Identifier of a bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub i64);

/// Read access to a business's weekly work schedule.
pub trait WorkScheduleRepository {
    /// The work window for a weekday, or `None` when the business has no
    /// schedule entry for that day.
    fn work_window(&self, business: BusinessId, day: Weekday) -> Option<WorkWindow>;
}

/// Read access to the bookings occupying a business's calendar.
pub trait BookingRepository {
    /// Bookings for one business on one calendar date.
    ///
    /// Implementations must return only bookings whose status
    /// [`occupies_schedule`](AppointmentStatus::occupies_schedule) — a
    /// cancelled or completed appointment never blocks a slot.
    fn active_bookings(&self, business: BusinessId, date: NaiveDate) -> Vec<ExistingBooking>;
}

/// Read access to the service catalog.
pub trait ServiceCatalog {
    /// Duration in minutes of an active service, or `None` when the service
    /// is unknown or deactivated.
    fn service_duration_minutes(&self, service: ServiceId) -> Option<u32>;
}

/// Availability queries and booking validation over injected repositories.
///
/// The decision logic itself stays pure; this type only concentrates the
/// fetch-then-decide sequence so HTTP handlers call one method per endpoint.
///
/// Between [`schedule`](Scheduler::schedule) returning `Ok` and the host
/// persisting the booking, a concurrent request can validate against the
/// same snapshot and also be accepted. The storage layer must close that
/// race: a transactional check-and-insert, a uniqueness constraint on
/// `(business, date, time range)`, or a per-business-per-date advisory lock
/// held across check and persist.
#[derive(Debug, Clone)]
pub struct Scheduler<W, B> {
    schedules: W,
    bookings: B,
}

impl<W: WorkScheduleRepository, B: BookingRepository> Scheduler<W, B> {
    pub fn new(schedules: W, bookings: B) -> Self {
        Scheduler { schedules, bookings }
    }

    /// Bookable start times for a service of the given duration on a date,
    /// at the default 15-minute step.
    ///
    /// # Errors
    /// `RejectionReason::NoWorkScheduleForDay` when the business is closed
    /// on that weekday; hosts typically render this as an empty slot list
    /// plus an explanatory message.
    pub fn available_slots(
        &self,
        business: BusinessId,
        date: NaiveDate,
        service_duration_minutes: u32,
    ) -> Result<Vec<TimeOfDay>, RejectionReason> {
        let window = self
            .schedules
            .work_window(business, date.weekday())
            .filter(|w| w.is_active)
            .ok_or(RejectionReason::NoWorkScheduleForDay)?;

        let busy: Vec<Interval> = self
            .bookings
            .active_bookings(business, date)
            .iter()
            .map(|booking| booking.interval)
            .collect();

        Ok(generate_slots(
            &window.window,
            service_duration_minutes,
            &busy,
        ))
    }

    /// Validate a booking request end to end: fetch the window and the
    /// active bookings, then delegate to [`validate_booking`].
    ///
    /// On `Ok`, persisting the accepted start/end remains the caller's job.
    pub fn schedule(
        &self,
        business: BusinessId,
        request: &BookingRequest,
    ) -> Result<AcceptedBooking, RejectionReason> {
        let window = self
            .schedules
            .work_window(business, request.date.weekday());
        let existing = self.bookings.active_bookings(business, request.date);
        validate_booking(request, window.as_ref(), &existing)
    }
}

/// Hash-map-backed work schedule, keyed by business and weekday.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchedule {
    windows: HashMap<(BusinessId, Weekday), WorkWindow>,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the window for `window.day_of_week`.
    pub fn insert(&mut self, business: BusinessId, window: WorkWindow) {
        self.windows.insert((business, window.day_of_week), window);
    }
}

impl WorkScheduleRepository for InMemorySchedule {
    fn work_window(&self, business: BusinessId, day: Weekday) -> Option<WorkWindow> {
        self.windows.get(&(business, day)).copied()
    }
}

/// Hash-map-backed booking store. Keeps full status information and applies
/// the active-status filter on read, the way a SQL-backed implementation
/// filters in its WHERE clause.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookings {
    bookings: HashMap<(BusinessId, NaiveDate), Vec<(ExistingBooking, AppointmentStatus)>>,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        business: BusinessId,
        date: NaiveDate,
        booking: ExistingBooking,
        status: AppointmentStatus,
    ) {
        self.bookings
            .entry((business, date))
            .or_default()
            .push((booking, status));
    }
}

impl BookingRepository for InMemoryBookings {
    fn active_bookings(&self, business: BusinessId, date: NaiveDate) -> Vec<ExistingBooking> {
        self.bookings
            .get(&(business, date))
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, status)| status.occupies_schedule())
                    .map(|(booking, _)| *booking)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Hash-map-backed service catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    durations: HashMap<ServiceId, u32>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, service: ServiceId, duration_minutes: u32) {
        self.durations.insert(service, duration_minutes);
    }
}

impl ServiceCatalog for InMemoryCatalog {
    fn service_duration_minutes(&self, service: ServiceId) -> Option<u32> {
        self.durations.get(&service).copied()
    }
}
