//! Transformer: raw records → clean records
//!
//! One clean record per raw record, order preserved. Nothing in a single
//! record can fail the batch: unparsable dates, numbers and genre text
//! become absent fields and are only counted.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Writer};
use movies_common::config::DataPaths;
use movies_common::{genre, Movie, RawRecord, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Per-record parse anomalies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anomalies {
    pub missing_title: bool,
    pub bad_date: bool,
    pub missing_genre: bool,
    pub zero_budget: bool,
    pub zero_revenue: bool,
    /// Negative budget or revenue cells, dropped to absent
    pub negative_amounts: usize,
    /// Numeric cells that were present but did not parse
    pub bad_numbers: usize,
}

/// Batch summary of one transform run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub raw_rows: usize,
    pub clean_rows: usize,
    pub missing_titles: usize,
    pub bad_dates: usize,
    pub missing_genres: usize,
    pub zero_budgets: usize,
    pub zero_revenues: usize,
    pub negative_amounts: usize,
    pub bad_numbers: usize,
    pub with_roi: usize,
}

impl TransformReport {
    fn record(&mut self, movie: &Movie, anomalies: &Anomalies) {
        self.clean_rows += 1;
        self.missing_titles += usize::from(anomalies.missing_title);
        self.bad_dates += usize::from(anomalies.bad_date);
        self.missing_genres += usize::from(anomalies.missing_genre);
        self.zero_budgets += usize::from(anomalies.zero_budget);
        self.zero_revenues += usize::from(anomalies.zero_revenue);
        self.negative_amounts += anomalies.negative_amounts;
        self.bad_numbers += anomalies.bad_numbers;
        self.with_roi += usize::from(movie.roi.is_some());
    }
}

/// Clean one raw record
pub fn clean_record(raw: RawRecord) -> (Movie, Anomalies) {
    let mut anomalies = Anomalies::default();

    let title = match non_blank(raw.title.as_deref()) {
        Some(t) => t.to_string(),
        None => {
            anomalies.missing_title = true;
            String::new()
        }
    };

    let release_date = non_blank(raw.release_date.as_deref()).and_then(|text| {
        let parsed = parse_release_date(text);
        if parsed.is_none() {
            debug!("Unparsable release_date {:?} for {:?}", text, title);
            anomalies.bad_date = true;
        }
        parsed
    });
    let year = release_date.map(|d| d.year());

    let main_genre = raw.genres.as_deref().and_then(genre::main_genre);
    anomalies.missing_genre = main_genre.is_none();

    // Zero means unknown in the source and negatives are invalid; only
    // positive amounts survive, before roi is derived
    let budget = parse_number(raw.budget.as_deref(), &mut anomalies);
    let revenue = parse_number(raw.revenue.as_deref(), &mut anomalies);
    anomalies.zero_budget = budget == Some(0.0);
    anomalies.zero_revenue = revenue == Some(0.0);
    anomalies.negative_amounts = [budget, revenue]
        .iter()
        .filter(|v| v.is_some_and(|v| v < 0.0))
        .count();
    let budget = budget.filter(|b| *b > 0.0);
    let revenue = revenue.filter(|r| *r > 0.0);

    let movie = Movie {
        title,
        main_genre,
        budget,
        revenue,
        roi: Movie::compute_roi(budget, revenue),
        vote_average: parse_number(raw.vote_average.as_deref(), &mut anomalies),
        vote_count: parse_count(raw.vote_count.as_deref(), &mut anomalies),
        popularity: parse_number(raw.popularity.as_deref(), &mut anomalies),
        runtime: parse_number(raw.runtime.as_deref(), &mut anomalies),
        release_date,
        year,
    };

    (movie, anomalies)
}

/// Clean every record, preserving order
pub fn transform<I>(records: I) -> (Vec<Movie>, TransformReport)
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut report = TransformReport::default();
    let mut movies = Vec::new();

    for raw in records {
        report.raw_rows += 1;
        let (movie, anomalies) = clean_record(raw);
        report.record(&movie, &anomalies);
        movies.push(movie);
    }

    (movies, report)
}

/// Parse a release date; `None` for anything unrecognised
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn parse_number(text: Option<&str>, anomalies: &mut Anomalies) -> Option<f64> {
    let text = non_blank(text)?;
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            anomalies.bad_numbers += 1;
            None
        }
    }
}

fn parse_count(text: Option<&str>, anomalies: &mut Anomalies) -> Option<i64> {
    let text = non_blank(text)?;
    let parsed = text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    });
    if parsed.is_none() {
        anomalies.bad_numbers += 1;
    }
    parsed
}

/// Read the raw input file, keeping only the projected columns
pub fn read_raw(path: &Path) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut records = Vec::new();
    for result in rdr.deserialize::<RawRecord>() {
        records.push(result?);
    }
    Ok(records)
}

/// Write clean records to the intermediate file
///
/// The header is written even when there are no records.
pub fn write_clean(path: &Path, movies: &[Movie]) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    if movies.is_empty() {
        wtr.write_record(Movie::COLUMNS)?;
    }
    for movie in movies {
        wtr.serialize(movie)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Transform stage: raw file → intermediate file
pub fn run(paths: &DataPaths) -> Result<TransformReport> {
    let raw = read_raw(&paths.raw_csv)?;
    info!("Raw rows: {} ({})", raw.len(), paths.raw_csv.display());

    let (movies, report) = transform(raw);

    paths.ensure_data_dir()?;
    write_clean(&paths.clean_csv, &movies)?;

    info!(
        "Cleaned file saved: {} rows: {}",
        paths.clean_csv.display(),
        report.clean_rows
    );
    info!(
        "Anomalies: {} unparsable dates, {} without genre, {} zero budgets, {} zero revenues, {} negative amounts, {} bad numbers, {} missing titles",
        report.bad_dates,
        report.missing_genres,
        report.zero_budgets,
        report.zero_revenues,
        report.negative_amounts,
        report.bad_numbers,
        report.missing_titles
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(budget: &str, revenue: &str, genres: &str, date: &str) -> RawRecord {
        RawRecord {
            title: Some("Avatar".to_string()),
            genres: Some(genres.to_string()),
            budget: Some(budget.to_string()),
            revenue: Some(revenue.to_string()),
            vote_average: Some("7.2".to_string()),
            vote_count: Some("11800".to_string()),
            release_date: Some(date.to_string()),
            popularity: Some("150.437577".to_string()),
            runtime: Some("162.0".to_string()),
        }
    }

    #[test]
    fn test_full_record() {
        let (movie, anomalies) = clean_record(raw(
            "237000000",
            "2787965087",
            "[{'id': 28, 'name': 'Action'}, {'id': 12, 'name': 'Adventure'}]",
            "2009-12-10",
        ));

        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.main_genre.as_deref(), Some("Action"));
        assert_eq!(movie.budget, Some(237_000_000.0));
        assert_eq!(movie.revenue, Some(2_787_965_087.0));
        assert!((movie.roi.unwrap() - 2_787_965_087.0 / 237_000_000.0).abs() < 1e-12);
        assert_eq!(movie.vote_average, Some(7.2));
        assert_eq!(movie.vote_count, Some(11800));
        assert_eq!(movie.runtime, Some(162.0));
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(2009, 12, 10));
        assert_eq!(movie.year, Some(2009));
        assert_eq!(anomalies, Anomalies::default());
    }

    #[test]
    fn test_zero_budget_is_absent_and_blocks_roi() {
        let (movie, anomalies) = clean_record(raw("0", "5000", "[]", "2001-01-01"));
        assert_eq!(movie.budget, None);
        assert_eq!(movie.revenue, Some(5000.0));
        assert_eq!(movie.roi, None);
        assert!(anomalies.zero_budget);
    }

    #[test]
    fn test_zero_revenue_is_absent_and_blocks_roi() {
        let (movie, anomalies) = clean_record(raw("1000", "0.0", "[]", "2001-01-01"));
        assert_eq!(movie.budget, Some(1000.0));
        assert_eq!(movie.revenue, None);
        assert_eq!(movie.roi, None);
        assert!(anomalies.zero_revenue);
    }

    #[test]
    fn test_negative_amounts_are_absent_and_keep_roi_invariant() {
        let (movie, anomalies) = clean_record(raw("-5000", "10000", "[]", "2001-01-01"));
        assert_eq!(movie.budget, None);
        assert_eq!(movie.revenue, Some(10000.0));
        assert_eq!(movie.roi, None);
        assert_eq!(anomalies.negative_amounts, 1);
        assert!(!anomalies.zero_budget);

        let (movie, anomalies) = clean_record(raw("5000", "-1", "[]", "2001-01-01"));
        assert_eq!(movie.revenue, None);
        assert_eq!(movie.roi, None);
        assert_eq!(anomalies.negative_amounts, 1);

        for (budget, revenue) in [("-1", "-1"), ("-2", "0"), ("3", "6"), ("0", "-4")] {
            let (movie, _) = clean_record(raw(budget, revenue, "[]", "2001-01-01"));
            assert_eq!(
                movie.roi.is_some(),
                movie.budget.is_some() && movie.revenue.is_some(),
                "roi invariant broken for budget={budget} revenue={revenue}"
            );
        }
    }

    #[test]
    fn test_bad_date_degrades_to_absent() {
        let (movie, anomalies) = clean_record(raw("10", "20", "[]", "sometime in 1999"));
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.year, None);
        assert!(anomalies.bad_date);
        // The rest of the record is still cleaned
        assert_eq!(movie.roi, Some(2.0));
    }

    #[test]
    fn test_blank_date_is_absent_without_anomaly() {
        let (movie, anomalies) = clean_record(raw("10", "20", "[]", "  "));
        assert_eq!(movie.year, None);
        assert!(!anomalies.bad_date);
    }

    #[test]
    fn test_malformed_genres_degrade_to_absent() {
        let (movie, anomalies) = clean_record(raw("10", "20", "not a list", "2001-01-01"));
        assert_eq!(movie.main_genre, None);
        assert!(anomalies.missing_genre);
    }

    #[test]
    fn test_unparsable_numbers_are_absent() {
        let mut record = raw("lots", "20", "[]", "2001-01-01");
        record.vote_count = Some("many".to_string());
        record.runtime = None;

        let (movie, anomalies) = clean_record(record);
        assert_eq!(movie.budget, None);
        assert_eq!(movie.roi, None);
        assert_eq!(movie.vote_count, None);
        assert_eq!(movie.runtime, None);
        assert_eq!(anomalies.bad_numbers, 2);
    }

    #[test]
    fn test_vote_count_accepts_integral_float_text() {
        let mut record = raw("10", "20", "[]", "2001-01-01");
        record.vote_count = Some("42.0".to_string());
        assert_eq!(clean_record(record).0.vote_count, Some(42));
    }

    #[test]
    fn test_missing_title_is_empty_text() {
        let mut record = raw("10", "20", "[]", "2001-01-01");
        record.title = None;
        let (movie, anomalies) = clean_record(record);
        assert_eq!(movie.title, "");
        assert!(anomalies.missing_title);
    }

    #[test]
    fn test_parse_release_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2015, 6, 9);
        assert_eq!(parse_release_date("2015-06-09"), expected);
        assert_eq!(parse_release_date("2015/06/09"), expected);
        assert_eq!(parse_release_date("2015-06-09 00:00:00"), expected);
        assert_eq!(parse_release_date("2015-06-09T12:30:00"), expected);
        assert_eq!(parse_release_date("2015-06-09T12:30:00+02:00"), expected);
        assert_eq!(parse_release_date("2015-13-40"), None);
        assert_eq!(parse_release_date("June 9"), None);
    }

    #[test]
    fn test_transform_preserves_order_and_counts() {
        let records = vec![
            raw("0", "0", "[]", "bad"),
            raw("10", "30", "[{'id': 18, 'name': 'Drama'}]", "2010-02-03"),
            raw("5", "0", "oops", ""),
        ];

        let (movies, report) = transform(records);

        assert_eq!(movies.len(), 3);
        assert_eq!(movies[1].main_genre.as_deref(), Some("Drama"));
        assert_eq!(movies[1].roi, Some(3.0));
        assert_eq!(
            report,
            TransformReport {
                raw_rows: 3,
                clean_rows: 3,
                missing_titles: 0,
                bad_dates: 1,
                missing_genres: 2,
                zero_budgets: 1,
                zero_revenues: 2,
                negative_amounts: 0,
                bad_numbers: 0,
                with_roi: 1,
            }
        );
    }
}
