//! Property-based tests for the overlap predicate, the slot ladder, and
//! booking validation.
//!
//! These verify invariants that must hold for *any* valid input, not just the
//! fixtures in the example-based test files.

use proptest::prelude::*;
use slot_engine::{
    generate_slots_with_step, is_available, validate_booking, BookingRequest, Interval,
    RejectionReason, TimeOfDay, WorkWindow,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// An arbitrary interval as (start, end) minutes with start < end < 1440.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0u16..1439)
        .prop_flat_map(|start| (Just(start), start + 1..=1439))
        .prop_map(|(start, end)| {
            Interval::new(
                TimeOfDay::from_minutes(start).unwrap(),
                TimeOfDay::from_minutes(end).unwrap(),
            )
            .unwrap()
        })
}

/// A work window wide enough to be interesting (at least one hour).
fn arb_window() -> impl Strategy<Value = Interval> {
    (0u16..=1379)
        .prop_flat_map(|start| (Just(start), start + 60..=1439))
        .prop_map(|(start, end)| {
            Interval::new(
                TimeOfDay::from_minutes(start).unwrap(),
                TimeOfDay::from_minutes(end).unwrap(),
            )
            .unwrap()
        })
}

fn arb_existing() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..6)
}

fn arb_duration() -> impl Strategy<Value = u32> {
    1u32..=180
}

fn arb_step() -> impl Strategy<Value = u16> {
    1u16..=60
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Overlap is symmetric
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_interval(), b in arb_interval()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}

// ---------------------------------------------------------------------------
// Property 2: No offered slot ever conflicts with an existing booking
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn offered_slots_never_conflict(
        window in arb_window(),
        dur in arb_duration(),
        existing in arb_existing(),
        step in arb_step(),
    ) {
        let slots = generate_slots_with_step(&window, dur, &existing, step).unwrap();

        for start in slots {
            let end = start
                .checked_add_minutes(dur)
                .expect("offered slot must not wrap past midnight");
            let candidate = Interval::new(start, end).unwrap();
            prop_assert!(
                is_available(&candidate, &existing),
                "slot {} conflicts with an existing booking",
                start
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Exhaustive ladder count on an empty book
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_book_ladder_count(
        window in arb_window(),
        dur in arb_duration(),
        step in arb_step(),
    ) {
        let slots = generate_slots_with_step(&window, dur, &[], step).unwrap();

        let window_minutes = u32::from(window.duration_minutes());
        let expected = if dur <= window_minutes {
            (window_minutes - dur) / u32::from(step) + 1
        } else {
            0
        };
        prop_assert_eq!(slots.len() as u32, expected);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Generation is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_is_idempotent(
        window in arb_window(),
        dur in arb_duration(),
        existing in arb_existing(),
        step in arb_step(),
    ) {
        let first = generate_slots_with_step(&window, dur, &existing, step).unwrap();
        let second = generate_slots_with_step(&window, dur, &existing, step).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Offered slots are sorted, in-window, and step-aligned
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn offered_slots_are_sorted_in_window_and_aligned(
        window in arb_window(),
        dur in arb_duration(),
        existing in arb_existing(),
        step in arb_step(),
    ) {
        let slots = generate_slots_with_step(&window, dur, &existing, step).unwrap();

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1], "slots not strictly increasing");
        }

        let window_start = window.start().minutes_since_midnight();
        for start in &slots {
            let minutes = start.minutes_since_midnight();
            prop_assert!(*start >= window.start());
            prop_assert_eq!(
                (minutes - window_start) % step,
                0,
                "slot {} is off the {}-minute grid",
                start,
                step
            );

            let end = start.checked_add_minutes(dur).unwrap();
            prop_assert!(end <= window.end(), "slot {} overshoots the window", start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Accepted bookings have the exact duration and fit the window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn accepted_bookings_fit_exactly(
        window in arb_window(),
        start_minutes in 0u16..1440,
        dur in arb_duration(),
        existing_intervals in arb_existing(),
    ) {
        let work_window = WorkWindow {
            day_of_week: chrono::Weekday::Mon,
            window,
            is_active: true,
        };
        let existing: Vec<slot_engine::ExistingBooking> = existing_intervals
            .iter()
            .enumerate()
            .map(|(i, interval)| slot_engine::ExistingBooking {
                id: slot_engine::BookingId(i as i64),
                interval: *interval,
            })
            .collect();

        let request = BookingRequest {
            // 2026-03-16 is a Monday.
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
            desired_start: TimeOfDay::from_minutes(start_minutes).unwrap(),
            service_duration_minutes: dur,
            exclude_booking_id: None,
        };

        match validate_booking(&request, Some(&work_window), &existing) {
            Ok(accepted) => {
                prop_assert_eq!(accepted.start, request.desired_start);
                let span = accepted.start.duration_until(accepted.end).unwrap();
                prop_assert_eq!(u32::from(span), dur);
                prop_assert!(accepted.start >= window.start());
                prop_assert!(accepted.end <= window.end());

                let candidate = Interval::new(accepted.start, accepted.end).unwrap();
                prop_assert!(is_available(&candidate, &existing_intervals));
            }
            Err(reason) => {
                // An open window with a valid request can only fail for one
                // of the two remaining reasons.
                prop_assert_ne!(reason, RejectionReason::NoWorkScheduleForDay);
            }
        }
    }
}
