use chrono::NaiveDate;

use crate::domain::destination::Destination;
use crate::domain::errors::{
    BookingField, CHECK_IN_IN_PAST, CHECK_IN_REQUIRED, CHECK_OUT_NOT_AFTER_CHECK_IN,
    CHECK_OUT_REQUIRED, DESTINATION_REQUIRED, INVALID_GUEST_COUNT, INVALID_ROOM_TYPE,
    ValidationErrors,
};
use crate::domain::intent::{BookingIntent, FormValue, MAX_GUESTS, MIN_GUESTS, RawBookingForm};
use crate::domain::ports::Clock;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Booking form validation with an injected clock for the past-date rule.
pub struct BookingValidator<C> {
    pub clock: C,
}

impl<C> BookingValidator<C>
where
    C: Clock,
{
    // Runs every rule and reports all violated fields together.
    pub fn validate(&self, form: &RawBookingForm) -> Result<BookingIntent, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let today = self.clock.today();

        let destination = present(&form.destination).and_then(Destination::from_slug);
        if destination.is_none() {
            errors.insert(BookingField::Destination, DESTINATION_REQUIRED);
        }

        let check_in = present(&form.check_in).and_then(parse_date);
        match check_in {
            None => errors.insert(BookingField::CheckIn, CHECK_IN_REQUIRED),
            Some(date) if date < today => errors.insert(BookingField::CheckIn, CHECK_IN_IN_PAST),
            Some(_) => {}
        }

        let check_out = present(&form.check_out).and_then(parse_date);
        if check_out.is_none() {
            errors.insert(BookingField::CheckOut, CHECK_OUT_REQUIRED);
        }

        let guest_count = present(&form.guest_count).and_then(parse_guest_count);
        if guest_count.is_none() {
            errors.insert(BookingField::GuestCount, INVALID_GUEST_COUNT);
        }

        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_out <= check_in {
                errors.insert(BookingField::CheckOut, CHECK_OUT_NOT_AFTER_CHECK_IN);
            }
        }

        // Room type is optional; an unknown destination already has its own error.
        let mut room_type = None;
        if let (Some(raw), Some(destination)) = (form.room_type.as_ref(), destination) {
            match raw.as_text().map(str::trim) {
                Some("") => {}
                Some(slug) => {
                    room_type = destination.room(slug);
                    if room_type.is_none() {
                        errors.insert(BookingField::RoomType, INVALID_ROOM_TYPE);
                    }
                }
                None => errors.insert(BookingField::RoomType, INVALID_ROOM_TYPE),
            }
        }

        match (destination, check_in, check_out, guest_count) {
            (Some(destination), Some(check_in), Some(check_out), Some(guest_count))
                if errors.is_empty() =>
            {
                Ok(BookingIntent {
                    destination,
                    check_in,
                    check_out,
                    guest_count,
                    room_type,
                })
            }
            _ => Err(errors),
        }
    }
}

// Blank, whitespace-only and malformed inputs all fail the field's rule.
fn present(value: &Option<FormValue>) -> Option<&str> {
    value
        .as_ref()
        .and_then(FormValue::as_text)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

// Plain decimal digits only; signs and exponents are rejected.
fn parse_guest_count(value: &str) -> Option<u8> {
    if !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value
        .parse::<u8>()
        .ok()
        .filter(|count| (MIN_GUESTS..=MAX_GUESTS).contains(count))
}
