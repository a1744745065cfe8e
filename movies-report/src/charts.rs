//! Chart rendering using Plotters
//!
//! Both charts are written as SVG. An empty input still produces a file:
//! the caption plus an explicit "No data" message.

use movies_common::queries::YearPoint;
use movies_common::stats;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::{ReportError, Result};

/// Number of log-spaced ROI histogram bins
pub const ROI_BINS: usize = 50;

pub const RATING_TREND_TITLE: &str = "Average Movie Rating by Year";
pub const ROI_TITLE: &str = "ROI Distribution";

const TREND_SIZE: (u32, u32) = (800, 400);
const ROI_SIZE: (u32, u32) = (600, 400);
const NO_DATA: &str = "No data available";

/// Line chart of mean rating per year
pub fn render_rating_trend(points: &[YearPoint], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, TREND_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ReportError::chart)?;

    if points.is_empty() {
        draw_empty(&root, RATING_TREND_TITLE, TREND_SIZE)?;
        return root.present().map_err(ReportError::chart);
    }

    let first_year = points.iter().map(|p| p.year).min().unwrap_or_default();
    let last_year = points.iter().map(|p| p.year).max().unwrap_or_default();
    let (x_min, x_max) = if first_year == last_year {
        (first_year - 1, last_year + 1)
    } else {
        (first_year, last_year)
    };

    let y_min = points.iter().map(|p| p.mean_rating).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.mean_rating).fold(f64::NEG_INFINITY, f64::max);
    let y_min = (y_min - 0.5).max(0.0);
    let y_max = y_max + 0.5;

    let mut chart = ChartBuilder::on(&root)
        .caption(RATING_TREND_TITLE, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(ReportError::chart)?;

    chart
        .configure_mesh()
        .x_desc("year")
        .y_desc("vote_average")
        .draw()
        .map_err(ReportError::chart)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.year, p.mean_rating)),
            &BLUE,
        ))
        .map_err(ReportError::chart)?;

    root.present().map_err(ReportError::chart)
}

/// Histogram of ROI values on a log10 value axis
pub fn render_roi_histogram(values: &[f64], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, ROI_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ReportError::chart)?;

    let bins = stats::log_histogram(values, ROI_BINS);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        draw_empty(&root, ROI_TITLE, ROI_SIZE)?;
        return root.present().map_err(ReportError::chart);
    };

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption(ROI_TITLE, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d((first.lower..last.upper).log_scale(), 0usize..max_count + 1)
        .map_err(ReportError::chart)?;

    chart
        .configure_mesh()
        .x_desc("roi (log scale)")
        .y_desc("count")
        .draw()
        .map_err(ReportError::chart)?;

    chart
        .draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
            Rectangle::new([(b.lower, 0usize), (b.upper, b.count)], BLUE.mix(0.6).filled())
        }))
        .map_err(ReportError::chart)?;

    root.present().map_err(ReportError::chart)
}

fn draw_empty(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    title: &str,
    (width, height): (u32, u32),
) -> Result<()> {
    let area = root
        .titled(title, ("sans-serif", 24).into_font())
        .map_err(ReportError::chart)?;

    area.draw(&Text::new(
        NO_DATA,
        (width as i32 / 2 - 80, height as i32 / 2 - 40),
        ("sans-serif", 20).into_font(),
    ))
    .map_err(ReportError::chart)
}
