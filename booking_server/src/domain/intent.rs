use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::destination::{Destination, RoomType};

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 10;

// Raw form fields exactly as submitted; anything may be blank or malformed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookingForm {
    #[serde(default)]
    pub destination: Option<FormValue>,
    #[serde(default)]
    pub check_in: Option<FormValue>,
    #[serde(default)]
    pub check_out: Option<FormValue>,
    #[serde(default, alias = "guests")]
    pub guest_count: Option<FormValue>,
    #[serde(default)]
    pub room_type: Option<FormValue>,
}

// One submitted field. Integers arrive from JSON clients and strings from
// select inputs and urlencoded forms; any other shape is kept as malformed
// so the validator can report it against the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Malformed,
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        FormValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(value) => Some(value),
            FormValue::Malformed => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    // Decimals, booleans, arrays and objects.
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawScalar::deserialize(deserializer)? {
            RawScalar::Text(value) => FormValue::Text(value),
            RawScalar::Int(value) => FormValue::Text(value.to_string()),
            RawScalar::Other(_) => FormValue::Malformed,
        })
    }
}

// A validated booking search, ready for handoff. Only the validator builds one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    pub destination: Destination,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u8,
    #[serde(serialize_with = "room_slug", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<&'static RoomType>,
}

impl BookingIntent {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

fn room_slug<S: Serializer>(room: &Option<&'static RoomType>, serializer: S) -> Result<S::Ok, S::Error> {
    match room {
        Some(room) => serializer.serialize_str(room.slug),
        None => serializer.serialize_none(),
    }
}
