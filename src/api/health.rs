//! Liveness probe endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::service::Service;

/// `GET /health`: always returns 200 OK with the service's plaintext body.
///
/// Reads nothing from the request and touches no shared state, so it is safe
/// to hit as often as an orchestrator likes.
pub async fn health(State(service): State<Service>) -> impl IntoResponse {
    (StatusCode::OK, service.health_body())
}
