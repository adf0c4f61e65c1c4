use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::domain::intent::{BookingIntent, FormValue, RawBookingForm};
use crate::domain::ports::{Clock, Dispatch, SearchHandler};

// Shared fixed calendar date for deterministic use-case tests.
#[derive(Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub(crate) fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date should parse")
}

pub(crate) fn form(
    destination: &str,
    check_in: &str,
    check_out: &str,
    guest_count: &str,
    room_type: Option<&str>,
) -> RawBookingForm {
    RawBookingForm {
        destination: Some(FormValue::text(destination)),
        check_in: Some(FormValue::text(check_in)),
        check_out: Some(FormValue::text(check_out)),
        guest_count: Some(FormValue::text(guest_count)),
        room_type: room_type.map(FormValue::text),
    }
}

// Handler that remembers every intent it was given.
#[derive(Clone, Default)]
pub(crate) struct RecordingHandler {
    seen: Arc<Mutex<Vec<BookingIntent>>>,
}

impl RecordingHandler {
    pub(crate) fn seen(&self) -> Vec<BookingIntent> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

impl SearchHandler for RecordingHandler {
    fn handle(&self, intent: &BookingIntent) -> Dispatch {
        self.seen
            .lock()
            .expect("seen mutex poisoned")
            .push(intent.clone());
        Dispatch::Handled
    }
}
