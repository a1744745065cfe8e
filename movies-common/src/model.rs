//! Record models
//!
//! `RawRecord` is the projection of one input row onto the fields the
//! pipeline uses; `Movie` is the clean record shared by the intermediate
//! file, the store and every aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the raw input file, projected onto the retained columns
///
/// Every field is kept as text; the transformer decides what parses.
/// Columns not listed here are ignored by the reader.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    pub vote_average: Option<String>,
    pub vote_count: Option<String>,
    pub release_date: Option<String>,
    pub popularity: Option<String>,
    pub runtime: Option<String>,
}

/// Clean record
///
/// Invariants (established by the transformer):
/// - `budget` / `revenue` are positive when `Some`
/// - `roi` is `Some` iff both `budget` and `revenue` are `Some`
/// - `year` is `Some` iff `release_date` is `Some`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub title: String,
    pub main_genre: Option<String>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub roi: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub popularity: Option<f64>,
    pub runtime: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub year: Option<i32>,
}

impl Movie {
    /// Column names in intermediate-file and store order
    pub const COLUMNS: [&'static str; 11] = [
        "title",
        "main_genre",
        "budget",
        "revenue",
        "roi",
        "vote_average",
        "vote_count",
        "popularity",
        "runtime",
        "release_date",
        "year",
    ];

    /// Revenue over budget, absent unless both are present and budget > 0
    pub fn compute_roi(budget: Option<f64>, revenue: Option<f64>) -> Option<f64> {
        match (budget, revenue) {
            (Some(b), Some(r)) if b > 0.0 => Some(r / b),
            _ => None,
        }
    }

    /// True when this record's genre equals `genre` exactly
    pub fn has_genre(&self, genre: &str) -> bool {
        self.main_genre.as_deref() == Some(genre)
    }
}
