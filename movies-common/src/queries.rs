//! Aggregate queries against the `movies` table
//!
//! All queries are read-only and recomputed on every call; nothing here is
//! cached or persisted. Every query is well defined on an empty table.

use crate::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Canonical row limit for the revenue ranking
pub const DEFAULT_TOP_N: i64 = 10;

/// Title with its revenue, for the revenue ranking
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RevenueRow {
    pub title: String,
    pub revenue: Option<f64>,
}

/// Unweighted mean rating of one genre
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct GenreRating {
    pub main_genre: String,
    /// Absent when no movie of the genre has a rating
    pub mean_rating: Option<f64>,
    pub movie_count: i64,
}

/// One point of the rating-by-year series
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct YearPoint {
    pub year: i32,
    pub mean_rating: f64,
}

/// Top `n` movies by revenue, highest first
///
/// Movies without revenue sort after every movie with one.
pub async fn top_by_revenue(pool: &SqlitePool, n: i64) -> Result<Vec<RevenueRow>> {
    let rows = sqlx::query_as::<_, RevenueRow>(
        r#"
        SELECT title, revenue
        FROM movies
        ORDER BY revenue IS NULL ASC, revenue DESC
        LIMIT ?
        "#,
    )
    .bind(n.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Mean `vote_average` per genre, highest mean first
///
/// Movies without a genre are left out of the grouping. Ties and genres
/// without any rating are ordered by name, rating-less genres last.
pub async fn mean_rating_by_genre(pool: &SqlitePool) -> Result<Vec<GenreRating>> {
    let rows = sqlx::query_as::<_, GenreRating>(
        r#"
        SELECT main_genre,
               AVG(vote_average) AS mean_rating,
               COUNT(*) AS movie_count
        FROM movies
        WHERE main_genre IS NOT NULL
        GROUP BY main_genre
        ORDER BY AVG(vote_average) IS NULL ASC, AVG(vote_average) DESC, main_genre ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Mean `vote_average` per release year, ascending year
pub async fn rating_by_year(pool: &SqlitePool) -> Result<Vec<YearPoint>> {
    let rows = sqlx::query_as::<_, YearPoint>(
        r#"
        SELECT year, AVG(vote_average) AS mean_rating
        FROM movies
        WHERE year IS NOT NULL
          AND vote_average IS NOT NULL
        GROUP BY year
        ORDER BY year ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every defined ROI value
pub async fn roi_values(pool: &SqlitePool) -> Result<Vec<f64>> {
    let values = sqlx::query_scalar::<_, f64>(
        "SELECT roi FROM movies WHERE roi IS NOT NULL ORDER BY rowid ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(values)
}

/// Distinct genres present in the store, sorted
pub async fn distinct_genres(pool: &SqlitePool) -> Result<Vec<String>> {
    let genres = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT main_genre
        FROM movies
        WHERE main_genre IS NOT NULL
        ORDER BY main_genre ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(genres)
}
