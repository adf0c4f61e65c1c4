use serde::{Deserialize, Serialize};

use crate::domain::destination::{Destination, RoomType};
use crate::domain::errors::ValidationErrors;
use crate::domain::intent::BookingIntent;

// Successful validation or in-page search.
#[derive(Debug, Serialize)]
pub struct IntentAccepted {
    pub ok: bool,
    pub intent: BookingIntent,
}

impl From<BookingIntent> for IntentAccepted {
    fn from(intent: BookingIntent) -> Self {
        Self { ok: true, intent }
    }
}

// Field-by-field validation failure, rendered inline by the form.
#[derive(Debug, Serialize)]
pub struct IntentRejected {
    pub ok: bool,
    pub errors: ValidationErrors,
}

impl From<ValidationErrors> for IntentRejected {
    fn from(errors: ValidationErrors) -> Self {
        Self { ok: false, errors }
    }
}

#[derive(Debug, Serialize)]
pub struct DestinationView {
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub rooms: &'static [RoomType],
}

impl From<Destination> for DestinationView {
    fn from(destination: Destination) -> Self {
        Self {
            slug: destination.slug(),
            name: destination.display_name(),
            tagline: destination.tagline(),
            rooms: destination.rooms(),
        }
    }
}

// Request payload for switching the featured destination.
#[derive(Debug, Deserialize)]
pub struct SelectDestinationRequest {
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
