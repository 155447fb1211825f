//! WASM bindings for slot-engine.
//!
//! Exposes slot enumeration, booking validation, and the overlap predicate to
//! JavaScript via `wasm-bindgen`. All complex types cross the boundary as
//! JSON strings; times use the `"HH:MM"` form booking APIs already speak.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use slot_engine::{
    generate_slots_with_step, validate_booking, BookingId, BookingRequest, ExistingBooking,
    Interval, TimeOfDay, WorkWindow, DEFAULT_STEP_MINUTES,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for existing bookings passed from JavaScript.
#[derive(Deserialize)]
struct BookingInput {
    id: i64,
    start: String,
    end: String,
}

/// Input format for a work window passed from JavaScript.
#[derive(Deserialize)]
struct WorkWindowInput {
    start: String,
    end: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Input format for a booking request passed from JavaScript.
#[derive(Deserialize)]
struct RequestInput {
    /// Calendar date, `YYYY-MM-DD`.
    date: String,
    start: String,
    duration_minutes: u32,
    exclude_booking_id: Option<i64>,
}

/// Output format for a validation outcome.
#[derive(Serialize)]
struct DecisionDto {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary strings into domain types
// ---------------------------------------------------------------------------

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    s.parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid time '{s}': {e}")))
}

fn parse_interval(start: &str, end: &str) -> Result<Interval, JsValue> {
    Interval::new(parse_time(start)?, parse_time(end)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid date '{s}': expected YYYY-MM-DD")))
}

/// Convert a JSON array of `{id, start, end}` objects into bookings.
fn parse_bookings_json(json: &str) -> Result<Vec<ExistingBooking>, JsValue> {
    let inputs: Vec<BookingInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {e}")))?;

    inputs
        .into_iter()
        .map(|input| {
            Ok(ExistingBooking {
                id: BookingId(input.id),
                interval: parse_interval(&input.start, &input.end)?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Enumerate bookable start times within a work window.
///
/// `existing_json` must be a JSON array of `{id, start, end}` objects with
/// `"HH:MM"` times. Returns a JSON array of `"HH:MM"` start-time strings.
/// `step_minutes` defaults to 15 when omitted.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    work_start: &str,
    work_end: &str,
    service_duration_minutes: u32,
    existing_json: &str,
    step_minutes: Option<u16>,
) -> Result<String, JsValue> {
    let window = parse_interval(work_start, work_end)?;
    let existing: Vec<Interval> = parse_bookings_json(existing_json)?
        .iter()
        .map(|b| b.interval)
        .collect();

    let slots = generate_slots_with_step(
        &window,
        service_duration_minutes,
        &existing,
        step_minutes.unwrap_or(DEFAULT_STEP_MINUTES),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let rendered: Vec<String> = slots.iter().map(ToString::to_string).collect();
    serde_json::to_string(&rendered)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Validate a booking request against a work window and existing bookings.
///
/// `request_json` is `{date, start, duration_minutes, exclude_booking_id?}`;
/// `work_window_json` is `{start, end, is_active?}` or the string `"null"`
/// for a closed day; `existing_json` is a JSON array of `{id, start, end}`.
///
/// Returns `{accepted: true, start, end}` or
/// `{accepted: false, reason, message}` as a JSON string.
#[wasm_bindgen(js_name = "validateBooking")]
pub fn validate_booking_json(
    request_json: &str,
    work_window_json: &str,
    existing_json: &str,
) -> Result<String, JsValue> {
    let input: RequestInput = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {e}")))?;

    let window_input: Option<WorkWindowInput> = serde_json::from_str(work_window_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid work window JSON: {e}")))?;

    let date = parse_date(&input.date)?;
    let request = BookingRequest {
        date,
        desired_start: parse_time(&input.start)?,
        service_duration_minutes: input.duration_minutes,
        exclude_booking_id: input.exclude_booking_id.map(BookingId),
    };

    let window = window_input
        .map(|w| {
            Ok::<WorkWindow, JsValue>(WorkWindow {
                day_of_week: date.weekday(),
                window: parse_interval(&w.start, &w.end)?,
                is_active: w.is_active,
            })
        })
        .transpose()?;

    let existing = parse_bookings_json(existing_json)?;

    let decision = match validate_booking(&request, window.as_ref(), &existing) {
        Ok(accepted) => DecisionDto {
            accepted: true,
            start: Some(accepted.start.to_string()),
            end: Some(accepted.end.to_string()),
            reason: None,
            message: None,
        },
        Err(reason) => DecisionDto {
            accepted: false,
            start: None,
            end: None,
            reason: Some(format!("{reason:?}")),
            message: Some(reason.to_string()),
        },
    };

    serde_json::to_string(&decision)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Half-open overlap check on two `"HH:MM"` ranges.
#[wasm_bindgen(js_name = "intervalsOverlap")]
pub fn intervals_overlap(
    a_start: &str,
    a_end: &str,
    b_start: &str,
    b_end: &str,
) -> Result<bool, JsValue> {
    let a = parse_interval(a_start, a_end)?;
    let b = parse_interval(b_start, b_end)?;
    Ok(a.overlaps(&b))
}
