//! Static report: canonical queries + charts
//!
//! The store connection is held only while the queries run; chart
//! rendering works on the collected data.

use movies_common::config::DataPaths;
use movies_common::db;
use movies_common::queries::{self, GenreRating, RevenueRow, YearPoint};
use sqlx::SqlitePool;
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

use crate::{charts, Result};

pub const RATING_TREND_FILE: &str = "rating_trend.svg";
pub const ROI_DISTRIBUTION_FILE: &str = "roi_distribution.svg";

/// Everything the report shows, collected in one store session
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub top_revenue: Vec<RevenueRow>,
    pub genre_ratings: Vec<GenreRating>,
    pub rating_trend: Vec<YearPoint>,
    pub roi_values: Vec<f64>,
}

/// Paths of the rendered chart files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub rating_trend: PathBuf,
    pub roi_distribution: PathBuf,
}

/// Run every report query
pub async fn collect(pool: &SqlitePool, top_n: i64) -> Result<ReportData> {
    Ok(ReportData {
        top_revenue: queries::top_by_revenue(pool, top_n).await?,
        genre_ratings: queries::mean_rating_by_genre(pool).await?,
        rating_trend: queries::rating_by_year(pool).await?,
        roi_values: queries::roi_values(pool).await?,
    })
}

/// Console table for the revenue ranking
pub fn format_top_revenue(rows: &[RevenueRow]) -> String {
    let mut out = format!("\n== Top {} movies by revenue ==\n", rows.len());
    if rows.is_empty() {
        out.push_str("(no movies)\n");
        return out;
    }

    let width = title_width(rows.iter().map(|r| r.title.as_str()));
    let _ = writeln!(out, "{:>3}  {:<width$}  {:>15}", "#", "title", "revenue");
    for (i, row) in rows.iter().enumerate() {
        let revenue = row
            .revenue
            .map(|r| format!("{:.0}", r))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:>3}  {:<width$}  {:>15}", i + 1, row.title, revenue);
    }
    out
}

/// Console table for the mean rating per genre
pub fn format_genre_ratings(rows: &[GenreRating]) -> String {
    let mut out = String::from("\n== Average rating by genre ==\n");
    if rows.is_empty() {
        out.push_str("(no genres)\n");
        return out;
    }

    let width = title_width(rows.iter().map(|r| r.main_genre.as_str()));
    let _ = writeln!(out, "{:<width$}  {:>10}  {:>6}", "main_genre", "avg_rating", "movies");
    for row in rows {
        let rating = row
            .mean_rating
            .map(|r| format!("{:.2}", r))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:<width$}  {:>10}  {:>6}", row.main_genre, rating, row.movie_count);
    }
    out
}

fn title_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(10)
}

/// Render both charts into `output_dir`
pub fn render_charts(data: &ReportData, paths: &DataPaths) -> Result<ReportArtifacts> {
    paths.ensure_output_dir()?;

    let artifacts = ReportArtifacts {
        rating_trend: paths.output_dir.join(RATING_TREND_FILE),
        roi_distribution: paths.output_dir.join(ROI_DISTRIBUTION_FILE),
    };

    charts::render_rating_trend(&data.rating_trend, &artifacts.rating_trend)?;
    charts::render_roi_histogram(&data.roi_values, &artifacts.roi_distribution)?;

    Ok(artifacts)
}

/// Report stage: query the store, print summaries, render charts
pub async fn run(paths: &DataPaths, top_n: i64) -> Result<ReportArtifacts> {
    let pool = db::connect_readonly(&paths.database).await?;
    let data = collect(&pool, top_n).await;
    pool.close().await;
    let data = data?;

    info!(
        "Collected {} genres, {} years, {} roi values",
        data.genre_ratings.len(),
        data.rating_trend.len(),
        data.roi_values.len()
    );

    print!("{}", format_top_revenue(&data.top_revenue));
    print!("{}", format_genre_ratings(&data.genre_ratings));

    let artifacts = render_charts(&data, paths)?;
    info!("Plots saved in {}", paths.output_dir.display());

    Ok(artifacts)
}
