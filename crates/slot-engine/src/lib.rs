//! # slot-engine
//!
//! Appointment slot allocation and conflict detection for multi-tenant
//! booking platforms (salons, clinics, spas).
//!
//! Given a business's work window, a service duration, and the bookings
//! already on the calendar, the engine enumerates bookable start times and
//! validates booking requests so that no two active appointments for the
//! same business ever overlap. It is a pure, synchronous library: hosts
//! fetch schedule data, call in, and persist accepted bookings themselves.
//!
//! ## Modules
//!
//! - [`time`] — minute-granularity time-of-day arithmetic
//! - [`interval`] — half-open intervals and the authoritative overlap predicate
//! - [`slots`] — bookable slot enumeration within a work window
//! - [`scheduler`] — booking request validation
//! - [`store`] — repository seams, status model, in-memory reference stores
//! - [`error`] — error types

pub mod error;
pub mod interval;
pub mod scheduler;
pub mod slots;
pub mod store;
pub mod time;

pub use error::SlotError;
pub use interval::{is_available, Interval};
pub use scheduler::{
    validate_booking, AcceptedBooking, BookingId, BookingRequest, ExistingBooking,
    RejectionReason, WorkWindow,
};
pub use slots::{generate_slots, generate_slots_with_step, DEFAULT_STEP_MINUTES};
pub use store::{AppointmentStatus, BusinessId, Scheduler, ServiceId};
pub use time::TimeOfDay;
