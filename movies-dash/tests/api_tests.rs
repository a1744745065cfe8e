//! Integration tests for movies-dash HTTP endpoints
//!
//! Tests cover:
//! - Health and build info endpoints
//! - Genre selector options
//! - Filter-and-redraw cycle: no filter, exact genre, unknown genre
//! - Table pagination and bad query input
//! - Static page serving
//! - Startup snapshot from a store on disk

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use movies_common::{db, Movie};
use movies_dash::dashboard::DashboardData;
use movies_dash::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

fn movie(title: &str, genre: Option<&str>, revenue: Option<f64>, rating: f64, popularity: f64) -> Movie {
    Movie {
        title: title.to_string(),
        main_genre: genre.map(str::to_string),
        budget: Some(100.0),
        revenue,
        roi: Movie::compute_roi(Some(100.0), revenue),
        vote_average: Some(rating),
        vote_count: Some(42),
        popularity: Some(popularity),
        runtime: Some(110.0),
        release_date: None,
        year: Some(2015),
    }
}

fn sample_movies() -> Vec<Movie> {
    vec![
        movie("Alpha", Some("Drama"), Some(500.0), 7.5, 10.0),
        movie("Bravo", Some("Action"), Some(1500.0), 6.0, 30.0),
        movie("Charlie", Some("Drama"), Some(300.0), 8.0, 5.0),
        movie("Delta", None, Some(50.0), 5.5, 1.0),
        movie("Echo", Some("Comedy"), None, 6.5, 3.0),
    ]
}

/// Test helper: Create app over an in-memory snapshot
fn setup_app(page_size: i64) -> axum::Router {
    let state = AppState::new(DashboardData::new(sample_movies()), page_size);
    build_router(state)
}

/// Test helper: Create GET request
fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app.oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health and Build Info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get_json(setup_app(20), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "movies-dash");
    assert!(body["version"].is_string());
    assert_eq!(body["movies"], 5);
    assert_eq!(body["genres"], 3);
}

#[tokio::test]
async fn test_health_reports_empty_snapshot() {
    let app = build_router(AppState::new(DashboardData::default(), 20));
    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "empty");
    assert_eq!(body["movies"], 0);
    assert_eq!(body["genres"], 0);
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let (status, body) = get_json(setup_app(20), "/api/buildinfo").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Genre Selector
// =============================================================================

#[tokio::test]
async fn test_genres_sorted_without_null() {
    let (status, body) = get_json(setup_app(20), "/api/genres").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genres"], serde_json::json!(["Action", "Comedy", "Drama"]));
}

// =============================================================================
// Filter-and-Redraw
// =============================================================================

#[tokio::test]
async fn test_dashboard_without_filter() {
    let (status, body) = get_json(setup_app(20), "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genre"], Value::Null);
    assert_eq!(body["row_count"], 5);
    assert_eq!(body["row_text"], "Showing 5 movies");
    assert_eq!(body["rows"].as_array().unwrap().len(), 5);
    assert_eq!(body["columns"].as_array().unwrap().len(), 8);

    assert_eq!(body["revenue_by_genre"]["kind"], "bar");
    let bars = body["revenue_by_genre"]["bars"].as_array().unwrap();
    let genres: Vec<&str> = bars.iter().map(|b| b["main_genre"].as_str().unwrap()).collect();
    assert_eq!(genres, ["Action", "Comedy", "Drama"]);
    assert_eq!(bars[1]["mean_revenue"], Value::Null);
    assert_eq!(bars[2]["mean_revenue"], 400.0);

    assert_eq!(body["rating_vs_popularity"]["kind"], "scatter");
    assert_eq!(body["rating_vs_popularity"]["points"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_empty_genre_param_means_no_filter() {
    let (_, body) = get_json(setup_app(20), "/api/dashboard?genre=").await;
    assert_eq!(body["row_count"], 5);
}

#[tokio::test]
async fn test_dashboard_genre_filter() {
    let (status, body) = get_json(setup_app(20), "/api/dashboard?genre=Drama").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genre"], "Drama");
    assert_eq!(body["row_count"], 2);
    assert_eq!(body["row_text"], "Showing 2 movies");

    let rows = body["rows"].as_array().unwrap();
    assert!(rows.iter().all(|r| r["main_genre"] == "Drama"));

    let points = body["rating_vs_popularity"]["points"].as_array().unwrap();
    let titles: Vec<&str> = points.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Alpha", "Charlie"]);
    assert_eq!(points[0]["x"], 7.5);
    assert_eq!(points[0]["y"], 10.0);
    assert_eq!(points[0]["size"], 500.0);
    assert_eq!(points[0]["group"], "Drama");
}

#[tokio::test]
async fn test_unknown_genre_yields_empty_state() {
    let (status, body) = get_json(setup_app(20), "/api/dashboard?genre=Western").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["row_count"], 0);
    assert_eq!(body["row_text"], "Showing 0 movies");
    assert_eq!(body["rows"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_pages"], 0);
    assert_eq!(body["page"], 1);

    for chart in ["revenue_by_genre", "rating_vs_popularity"] {
        assert_eq!(body[chart]["kind"], "empty");
        assert_eq!(body[chart]["message"], "No data available for this selection");
    }
}

#[tokio::test]
async fn test_genre_with_spaces_is_url_decoded() {
    let state = AppState::new(
        DashboardData::new(vec![movie("Film", Some("Science Fiction"), Some(10.0), 7.0, 2.0)]),
        20,
    );
    let (_, body) = get_json(build_router(state), "/api/dashboard?genre=Science%20Fiction").await;
    assert_eq!(body["row_count"], 1);
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_pagination_pages_and_clamps() {
    let (_, body) = get_json(setup_app(2), "/api/dashboard?page=2").await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["row_count"], 5);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "Charlie");

    let (_, body) = get_json(setup_app(2), "/api/dashboard?page=99").await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["rows"].as_array().unwrap().len(), 1);

    let (_, body) = get_json(setup_app(2), "/api/dashboard?page=0").await;
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn test_oversized_page_size_is_capped() {
    let (status, body) = get_json(setup_app(i64::MAX), "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_size"], 1000);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["rows"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_invalid_page_is_bad_request() {
    let (status, body) = get_json(setup_app(20), "/api/dashboard?page=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
}

// =============================================================================
// Static Page
// =============================================================================

#[tokio::test]
async fn test_index_page_served() {
    let response = setup_app(20).oneshot(test_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("genre_filter"));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_app_js_content_type() {
    let response = setup_app(20).oneshot(test_request("/static/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

// =============================================================================
// Startup Snapshot
// =============================================================================

#[tokio::test]
async fn test_dashboard_data_loads_from_store() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("movies.db");

    let pool = db::connect(&db_path).await.unwrap();
    db::replace_movies(&pool, &sample_movies()).await.unwrap();
    pool.close().await;

    let data = DashboardData::load(&db_path).await.expect("Should load snapshot");
    assert_eq!(data.movies().len(), 5);
    assert_eq!(data.genres(), ["Action", "Comedy", "Drama"]);
    assert_eq!(data.movies()[0].title, "Alpha");
}

#[tokio::test]
async fn test_dashboard_data_requires_store() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("missing.db");

    assert!(DashboardData::load(&db_path).await.is_err());
    assert!(!db_path.exists());
}
