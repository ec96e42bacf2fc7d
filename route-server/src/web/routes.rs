//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use tracing::error;

use super::dto::ItineraryResponse;
use super::state::AppState;
use super::templates::ItineraryTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/itinerary", get(itinerary))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The current itinerary as JSON.
async fn itinerary(State(state): State<AppState>) -> Json<ItineraryResponse> {
    Json(ItineraryResponse::from_state(&state.snapshot()))
}

/// The itinerary page. Reloads itself once per refresh interval.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let view = ItineraryResponse::from_state(&state.snapshot());
    let template = ItineraryTemplate::new(view, state.refresh_interval);

    Html(template.render().unwrap_or_else(|e| {
        error!(error = %e, "Failed to render itinerary page");
        format!("Template error: {}", e)
    }))
}
