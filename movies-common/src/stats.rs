//! In-memory aggregates over clean records
//!
//! Every function here returns an empty or absent result for empty input;
//! none of them divides by a zero count.

use crate::Movie;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean revenue of one genre within a record subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRevenue {
    pub main_genre: String,
    /// Absent when no movie of the genre has a revenue
    pub mean_revenue: Option<f64>,
    pub movie_count: usize,
}

/// One histogram bin, bounds in value space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Arithmetic mean, `None` for no values
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean revenue per genre, genre ascending
///
/// Movies without a genre are left out of the grouping.
pub fn mean_revenue_by_genre(movies: &[&Movie]) -> Vec<GenreRevenue> {
    let mut groups: BTreeMap<&str, Vec<&Movie>> = BTreeMap::new();
    for movie in movies {
        if let Some(genre) = movie.main_genre.as_deref() {
            groups.entry(genre).or_default().push(*movie);
        }
    }

    groups
        .into_iter()
        .map(|(genre, members)| GenreRevenue {
            main_genre: genre.to_string(),
            mean_revenue: mean(members.iter().filter_map(|m| m.revenue)),
            movie_count: members.len(),
        })
        .collect()
}

/// Histogram with `bins` log10-spaced bins spanning the positive values
///
/// Values that cannot sit on a log axis (zero, negative, non-finite) are
/// skipped. A single distinct value gets a one-decade-wide range.
pub fn log_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let logs: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite() && **v > 0.0)
        .map(|v| v.log10())
        .collect();

    if logs.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for log in &logs {
        let idx = (((log - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: 10f64.powf(lo + width * i as f64),
            upper: 10f64.powf(lo + width * (i + 1) as f64),
            count,
        })
        .collect()
}
