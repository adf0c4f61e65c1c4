use serde::Serialize;
use std::collections::BTreeMap;

pub const DESTINATION_REQUIRED: &str = "destination required";
pub const CHECK_IN_REQUIRED: &str = "check-in date required";
pub const CHECK_IN_IN_PAST: &str = "check-in date cannot be in the past";
pub const CHECK_OUT_REQUIRED: &str = "check-out date required";
pub const INVALID_GUEST_COUNT: &str = "invalid guest count";
pub const CHECK_OUT_NOT_AFTER_CHECK_IN: &str = "check-out must be after check-in";
pub const INVALID_ROOM_TYPE: &str = "invalid room type for destination";

// Form fields that can carry a validation error, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    Destination,
    CheckIn,
    CheckOut,
    GuestCount,
    RoomType,
}

// Every violated field with its user-facing message. One message per field;
// a later rule for the same field replaces the earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<BookingField, &'static str>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookingField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: BookingField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_serialize_as_camel_case_object() {
        let mut errors = ValidationErrors::new();
        errors.insert(BookingField::GuestCount, INVALID_GUEST_COUNT);
        errors.insert(BookingField::CheckOut, CHECK_OUT_REQUIRED);

        let json = serde_json::to_value(&errors).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "checkOut": "check-out date required",
                "guestCount": "invalid guest count",
            })
        );
    }

    #[test]
    fn later_message_for_same_field_replaces_earlier_one() {
        let mut errors = ValidationErrors::new();
        errors.insert(BookingField::CheckOut, CHECK_OUT_REQUIRED);
        errors.insert(BookingField::CheckOut, CHECK_OUT_NOT_AFTER_CHECK_IN);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(BookingField::CheckOut),
            Some(CHECK_OUT_NOT_AFTER_CHECK_IN)
        );
    }
}
