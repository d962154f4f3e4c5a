//! egui_plot glue: turn a [`Series`] into drawable line segments, bounds and
//! axis tick labels. Drawing itself stays with the embedding application.

use std::ops::RangeInclusive;

use egui_plot::{GridMark, PlotBounds, PlotPoints};

use crate::data::series_view::Series;
use crate::data::x_formatter::TimeAxisFormatter;

/// Split the series at missing readings so no segment bridges a `NaN`.
pub fn line_segments(series: &Series) -> Vec<PlotPoints<'static>> {
    split_at_gaps(&series.points)
        .into_iter()
        .map(PlotPoints::new)
        .collect()
}

fn split_at_gaps(points: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for p in points {
        if p[1].is_finite() {
            current.push(*p);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Plot bounds: padded x range of the series, y range of its finite values.
pub fn plot_bounds(series: &Series) -> Option<PlotBounds> {
    let (x_min, x_max) = series.x_bounds?;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for y in series.ys().filter(|y| y.is_finite()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if y_min > y_max {
        (y_min, y_max) = (0.0, 1.0);
    }
    Some(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]))
}

/// Tick formatter for `egui_plot::Plot::x_axis_formatter`.
pub fn x_axis_formatter(
    formatter: TimeAxisFormatter,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, range| formatter.format(mark.value, (*range.start(), *range.end()))
}
