//! Dashboard data API
//!
//! One request is one recompute cycle: filter the snapshot by the selected
//! genre, rebuild table, counter and both charts, return one page of rows.
//! An unknown genre is not an error; it produces the empty state.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::dashboard::{update_dashboard, Chart, GenreSelection, TableRow, TABLE_COLUMNS};
use crate::pagination::calculate_pagination;
use crate::AppState;

/// Query parameters for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Selected genre; absent or empty means no filter
    pub genre: Option<String>,

    /// Table page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Dashboard response: one table page plus counter and charts
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub genre: Option<String>,
    pub row_count: usize,
    pub row_text: String,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub revenue_by_genre: Chart,
    pub rating_vs_popularity: Chart,
}

/// Genre selector options
#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

/// GET /api/genres
///
/// Distinct main genres present in the store, sorted.
pub async fn list_genres(State(state): State<AppState>) -> Json<GenresResponse> {
    Json(GenresResponse {
        genres: state.data.genres().to_vec(),
    })
}

/// GET /api/dashboard?genre=&page=
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardResponse>, DashboardError> {
    let Query(query) = query.map_err(|e| DashboardError::InvalidQuery(e.body_text()))?;
    let selection = GenreSelection::from_param(query.genre.as_deref());
    let update = update_dashboard(&state.data, &selection);

    let p = calculate_pagination(update.row_count as i64, query.page, state.page_size);
    let rows = p.slice(&update.rows).to_vec();

    debug!(
        "Dashboard recompute: selection={:?} rows={} page={}/{}",
        selection, update.row_count, p.page, p.total_pages
    );

    Ok(Json(DashboardResponse {
        genre: match selection {
            GenreSelection::All => None,
            GenreSelection::Genre(genre) => Some(genre),
        },
        row_count: update.row_count,
        row_text: update.row_text,
        page: p.page,
        page_size: p.page_size,
        total_pages: p.total_pages,
        columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        revenue_by_genre: update.revenue_by_genre,
        rating_vs_popularity: update.rating_vs_popularity,
    }))
}

/// Dashboard API errors
#[derive(Debug)]
pub enum DashboardError {
    InvalidQuery(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DashboardError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid query: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
