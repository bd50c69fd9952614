//! HTTP gateway (Axum) over the assistant pipeline.
//!
//! Thin marshalling only: user-facing fallback messages live here (the
//! pipeline reports outcomes, the transport words them), and model failures
//! are mapped to generic errors without leaking internals.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{chat_handler, report_handler, similar_handler};
pub use state::HandlerState;

use axum::extract::State;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/chat", post(chat_handler))
        .route("/v1/report", post(report_handler))
        .route("/v1/similar", get(similar_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub intents: usize,
    pub crimes: usize,
    pub encoder_mode: &'static str,
    pub sentiment_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    // The assistant only exists once the corpus loaded and every static
    // embedding was computed, so a live state is a ready state.
    let components = ComponentStatus {
        intents: state.assistant.corpus().intents().len(),
        crimes: state.assistant.corpus().crimes().len(),
        encoder_mode: if state.assistant.encoder_is_stub() {
            "stub"
        } else {
            "real"
        },
        sentiment_mode: if state.assistant.sentiment_is_stub() {
            "stub"
        } else {
            "real"
        },
    };

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
