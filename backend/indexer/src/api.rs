//! Axum REST API handlers. Read-only views over the indexed events.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{self, EventFilter};
use crate::errors::IndexerError;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubjectEventsResponse {
    pub subject: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(e: IndexerError) -> Response {
    tracing::error!("API query failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /subjects/:id/events`
///
/// Every indexed event whose subject topic is `id`: a project id, a
/// package hash in hex, a certificate token id or an address.
pub async fn get_subject_events(
    State(state): State<Arc<ApiState>>,
    Path(subject): Path<String>,
) -> Response {
    match db::get_events_for_subject(&state.pool, &subject).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(SubjectEventsResponse {
                    subject,
                    count,
                    events,
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /events?event_type=..&limit=..`
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<EventFilter>,
) -> Response {
    match db::get_all_events(&state.pool, &filter).await {
        Ok(events) => {
            let count = events.len();
            (StatusCode::OK, Json(AllEventsResponse { count, events })).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /dashboard/overview`
pub async fn get_overview(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_overview(&state.pool).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => internal_error(e),
    }
}
