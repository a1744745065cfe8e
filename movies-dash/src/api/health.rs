//! Health check endpoint
//!
//! Reports the size of the store snapshot the dashboard is serving, so an
//! empty or stale load is visible without opening the page.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Rows in the startup snapshot
    pub movies: usize,
    /// Distinct genres offered by the selector
    pub genres: usize,
}

/// GET /health
///
/// `status` is "empty" when the snapshot holds no rows; the server still
/// answers every dashboard request in that state.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let movies = state.data.movies().len();
    Json(HealthResponse {
        status: if movies == 0 { "empty" } else { "ok" },
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        movies,
        genres: state.data.genres().len(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
