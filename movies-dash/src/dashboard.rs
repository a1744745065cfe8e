//! Filter-and-redraw dashboard model
//!
//! `DashboardData` is the application state: a snapshot of the store taken
//! once at startup. `update_dashboard` is the whole recompute cycle for one
//! genre selection; it is pure, so every selection can be tested without a
//! running server.

use movies_common::stats::{self, GenreRevenue};
use movies_common::{db, queries, Movie, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Columns shown in the dashboard table
pub const TABLE_COLUMNS: [&str; 8] = [
    "title",
    "main_genre",
    "budget",
    "revenue",
    "vote_average",
    "popularity",
    "year",
    "roi",
];

pub const REVENUE_CHART_TITLE: &str = "Average Revenue by Genre";
pub const SCATTER_CHART_TITLE: &str = "Rating vs Popularity (Bubble = Revenue)";
pub const EMPTY_CHART_MESSAGE: &str = "No data available for this selection";

/// Snapshot of the store backing every dashboard request
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    movies: Vec<Movie>,
    genres: Vec<String>,
}

impl DashboardData {
    /// Build from records; genres are the sorted distinct main genres
    pub fn new(movies: Vec<Movie>) -> Self {
        let genres: BTreeSet<&str> = movies.iter().filter_map(|m| m.main_genre.as_deref()).collect();
        let genres = genres.into_iter().map(str::to_string).collect();
        Self { movies, genres }
    }

    /// Read the full store once; the connection is closed before returning
    pub async fn load(db_path: &Path) -> Result<Self> {
        let pool = db::connect_readonly(db_path).await?;
        let movies = db::fetch_all_movies(&pool).await;
        let genres = queries::distinct_genres(&pool).await;
        pool.close().await;

        let data = Self {
            movies: movies?,
            genres: genres?,
        };
        info!(
            "Loaded {} movies across {} genres",
            data.movies.len(),
            data.genres.len()
        );
        Ok(data)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Genre selector options, sorted
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

/// Genre selector value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreSelection {
    /// No filter: the whole store
    All,
    /// Exact `main_genre` match
    Genre(String),
}

impl GenreSelection {
    /// Absent or blank selector value means no filter
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => GenreSelection::Genre(v.to_string()),
            _ => GenreSelection::All,
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            GenreSelection::All => true,
            GenreSelection::Genre(genre) => movie.has_genre(genre),
        }
    }
}

/// One table row, restricted to `TABLE_COLUMNS`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub title: String,
    pub main_genre: Option<String>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    pub year: Option<i32>,
    pub roi: Option<f64>,
}

impl From<&Movie> for TableRow {
    fn from(m: &Movie) -> Self {
        Self {
            title: m.title.clone(),
            main_genre: m.main_genre.clone(),
            budget: m.budget,
            revenue: m.revenue,
            vote_average: m.vote_average,
            popularity: m.popularity,
            year: m.year,
            roi: m.roi,
        }
    }
}

/// Bubble of the rating-vs-popularity chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub title: String,
    /// vote_average
    pub x: f64,
    /// popularity
    pub y: f64,
    /// revenue; drawn at minimum size when absent
    pub size: Option<f64>,
    /// colour group
    pub group: Option<String>,
}

/// Chart payload; `Empty` is the explicit no-data state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Empty {
        title: String,
        message: String,
    },
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<GenreRevenue>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<BubblePoint>,
    },
}

impl Chart {
    fn empty(title: &str) -> Self {
        Chart::Empty {
            title: title.to_string(),
            message: EMPTY_CHART_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Chart::Empty { .. })
    }
}

/// Everything the view redraws after a selection change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub rows: Vec<TableRow>,
    pub revenue_by_genre: Chart,
    pub rating_vs_popularity: Chart,
    pub row_count: usize,
    pub row_text: String,
}

/// Recompute table, charts and counter for one selection
pub fn update_dashboard(data: &DashboardData, selection: &GenreSelection) -> DashboardUpdate {
    let selected: Vec<&Movie> = data.movies.iter().filter(|m| selection.matches(m)).collect();

    DashboardUpdate {
        rows: selected.iter().map(|m| TableRow::from(*m)).collect(),
        revenue_by_genre: revenue_chart(&selected),
        rating_vs_popularity: scatter_chart(&selected),
        row_count: selected.len(),
        row_text: format!("Showing {} movies", selected.len()),
    }
}

fn revenue_chart(selected: &[&Movie]) -> Chart {
    let bars = stats::mean_revenue_by_genre(selected);
    if bars.is_empty() {
        return Chart::empty(REVENUE_CHART_TITLE);
    }

    Chart::Bar {
        title: REVENUE_CHART_TITLE.to_string(),
        x_label: "main_genre".to_string(),
        y_label: "revenue".to_string(),
        bars,
    }
}

fn scatter_chart(selected: &[&Movie]) -> Chart {
    let points: Vec<BubblePoint> = selected
        .iter()
        .filter_map(|m| {
            Some(BubblePoint {
                title: m.title.clone(),
                x: m.vote_average?,
                y: m.popularity?,
                size: m.revenue,
                group: m.main_genre.clone(),
            })
        })
        .collect();

    if points.is_empty() {
        return Chart::empty(SCATTER_CHART_TITLE);
    }

    Chart::Scatter {
        title: SCATTER_CHART_TITLE.to_string(),
        x_label: "vote_average".to_string(),
        y_label: "popularity".to_string(),
        points,
    }
}
