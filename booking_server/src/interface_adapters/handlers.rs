use crate::domain::destination::Destination;
use crate::domain::errors::{BookingField, ValidationErrors};
use crate::domain::intent::{BookingIntent, RawBookingForm};
use crate::domain::ports::Dispatch;
use crate::interface_adapters::extract::BookingForm;
use crate::interface_adapters::protocol::{
    DestinationView, ErrorResponse, HealthResponse, IntentAccepted, IntentRejected,
    SelectDestinationRequest,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::showcase::ShowcaseSnapshot;
use crate::use_cases::validate::BookingValidator;
use crate::use_cases::dispatch::OverlaySubscription;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{
        IntoResponse, Redirect, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, stream};
use std::sync::Arc;

// Handler for liveness checks.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// Handler for listing both destinations with their room catalogs.
pub async fn list_destinations() -> Json<Vec<DestinationView>> {
    Json(Destination::ALL.into_iter().map(DestinationView::from).collect())
}

// Handler for a single destination looked up by slug.
pub async fn get_destination(
    Path(slug): Path<String>,
) -> Result<Json<DestinationView>, (StatusCode, Json<ErrorResponse>)> {
    Destination::from_slug(&slug)
        .map(|destination| Json(DestinationView::from(destination)))
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "unknown destination"))
}

// Handler for inline form validation without dispatching.
#[tracing::instrument(name = "validate_booking", skip_all, fields(destination = ?form.destination))]
pub async fn validate_booking(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RawBookingForm>,
) -> Result<Json<IntentAccepted>, (StatusCode, Json<IntentRejected>)> {
    let intent = validate(&state, &form)?;
    Ok(Json(IntentAccepted::from(intent)))
}

// Handler for a booking search: validate, then redirect or hand off in page.
#[tracing::instrument(name = "search_booking", skip_all, fields(destination = ?form.destination))]
pub async fn search_booking(
    State(state): State<Arc<AppState>>,
    BookingForm(form): BookingForm,
) -> Result<Response, (StatusCode, Json<IntentRejected>)> {
    let intent = validate(&state, &form)?;

    let response = match state.dispatcher.dispatch(&intent) {
        // 303 makes the browser open the reservation system with a GET.
        Dispatch::Navigate(url) => Redirect::to(url.as_str()).into_response(),
        Dispatch::Handled => {
            (StatusCode::ACCEPTED, Json(IntentAccepted::from(intent))).into_response()
        }
    };
    Ok(response)
}

// Handler for the current landing page rotation state.
pub async fn get_showcase(State(state): State<Arc<AppState>>) -> Json<ShowcaseSnapshot> {
    Json(state.showcase.snapshot())
}

// Handler for a manual destination toggle.
pub async fn select_showcase_destination(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectDestinationRequest>,
) -> Result<Json<ShowcaseSnapshot>, (StatusCode, Json<ErrorResponse>)> {
    let destination = Destination::from_slug(&body.destination)
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "unknown destination"))?;

    state.showcase.select_destination(destination);
    Ok(Json(state.showcase.snapshot()))
}

// Handler for streaming in-page booking intents to an open overlay.
pub async fn overlay_events(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, (StatusCode, Json<ErrorResponse>)>
{
    let feed = state
        .overlay
        .as_ref()
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "overlay mode disabled"))?;

    tracing::debug!("overlay subscriber connected");
    Ok(Sse::new(intent_events(feed.subscribe())).keep_alive(KeepAlive::default()))
}

fn intent_events(
    subscription: OverlaySubscription,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(subscription, |mut subscription| async move {
        let intent = subscription.next().await?;
        let event = Event::default()
            .event("booking-intent")
            .json_data(IntentAccepted::from(intent));
        Some((event, subscription))
    })
}

fn validate(
    state: &AppState,
    form: &RawBookingForm,
) -> Result<BookingIntent, (StatusCode, Json<IntentRejected>)> {
    let validator = BookingValidator {
        clock: state.clock.clone(),
    };

    validator.validate(form).map_err(|errors| {
        tracing::debug!(fields = ?field_names(&errors), "booking form rejected");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(IntentRejected::from(errors)),
        )
    })
}

fn field_names(errors: &ValidationErrors) -> Vec<BookingField> {
    errors.iter().map(|(field, _)| field).collect()
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}
