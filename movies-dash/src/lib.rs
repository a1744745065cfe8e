//! movies-dash library - interactive genre dashboard
//!
//! Serves one page with a genre selector, a paginated table, a row counter
//! and two charts, all recomputed on every selection change.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod dashboard;
pub mod pagination;

use dashboard::DashboardData;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Store snapshot taken at startup
    pub data: Arc<DashboardData>,
    /// Rows per table page
    pub page_size: i64,
}

impl AppState {
    /// Create new application state
    pub fn new(data: DashboardData, page_size: i64) -> Self {
        Self {
            data: Arc::new(data),
            page_size,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/genres", get(api::list_genres))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/buildinfo", get(api::get_build_info));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
