use crate::interface_adapters::handlers::{
    get_destination, get_showcase, health, list_destinations, overlay_events, search_booking,
    select_showcase_destination, validate_booking,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/destinations", get(list_destinations))
        .route("/destinations/{slug}", get(get_destination))
        .route("/booking/validate", post(validate_booking))
        .route("/booking/search", post(search_booking))
        .route("/booking/overlay", get(overlay_events))
        .route("/showcase", get(get_showcase))
        .route("/showcase/destination", put(select_showcase_destination))
        .with_state(state)
}
