//! Chart-series builder
//!
//! Turns a dataset and an axis selection into render-ready labels and values,
//! plus the statistics shown next to the chart.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::dataset::{Dataset, RowFilter};
use crate::groupby::{self, AggregateKind};
use crate::inference::{infer_column_type_with, ColumnType};
use crate::na::NA;
use crate::stats::{self, StatisticsSummary};
use crate::temporal;
use crate::value::{self, RawValue};
use crate::vis::config::ChartMode;

/// Group-by settings for bar and line charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    /// Column to bucket by; the x column when unset or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default)]
    pub aggregate: AggregateKind,
}

impl Grouping {
    pub fn new(aggregate: AggregateKind) -> Self {
        Grouping {
            column: None,
            aggregate,
        }
    }

    pub fn by<S: Into<String>>(mut self, column: S) -> Self {
        self.column = Some(column.into());
        self
    }

    fn column_or<'a>(&'a self, x_column: &'a str) -> &'a str {
        match self.column.as_deref() {
            Some(column) if !column.trim().is_empty() => column,
            _ => x_column,
        }
    }
}

/// Optional transformations applied while building a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RowFilter>,
}

impl SeriesOptions {
    pub fn grouped(grouping: Grouping) -> Self {
        SeriesOptions {
            grouping: Some(grouping),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Plotted values: one number per label, or free (x, y) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesPoints {
    Values(Vec<f64>),
    Coordinates(Vec<Point>),
}

impl SeriesPoints {
    pub fn len(&self) -> usize {
        match self {
            SeriesPoints::Values(v) => v.len(),
            SeriesPoints::Coordinates(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            SeriesPoints::Values(v) => Some(v),
            SeriesPoints::Coordinates(_) => None,
        }
    }

    pub fn coordinates(&self) -> Option<&[Point]> {
        match self {
            SeriesPoints::Coordinates(c) => Some(c),
            SeriesPoints::Values(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDataset {
    pub label: String,
    pub points: SeriesPoints,
}

/// Render-ready labels and datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesDataset>,
}

impl ChartSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Everything the builder produces for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOutput {
    pub series: ChartSeries,
    pub statistics: StatisticsSummary,
    pub correlation: NA<f64>,
    /// Inferred type of the x column (`unknown` when nothing was built)
    pub x_type: ColumnType,
    pub grouped: bool,
}

impl SeriesOutput {
    /// Empty series with no statistics and no correlation.
    pub fn unavailable() -> Self {
        SeriesOutput {
            series: ChartSeries::empty(),
            statistics: StatisticsSummary::unavailable(),
            correlation: NA::NA,
            x_type: ColumnType::Unknown,
            grouped: false,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.series.is_empty()
    }
}

/// Builds a chart series with the default configuration.
pub fn build_series(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    mode: ChartMode,
    options: &SeriesOptions,
) -> SeriesOutput {
    build_series_with(dataset, x_column, y_column, mode, options, &AnalysisConfig::default())
}

/// Builds a chart series.
///
/// Column types are inferred over the whole dataset; the optional row filter
/// then selects the rows that are charted. Bar and line charts need a numeric
/// y column and are aggregated when grouping is set. Scatter charts need both
/// columns numeric, ignore grouping, and report a correlation instead of
/// statistics.
pub fn build_series_with(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    mode: ChartMode,
    options: &SeriesOptions,
    config: &AnalysisConfig,
) -> SeriesOutput {
    if dataset.is_empty() || x_column.trim().is_empty() || y_column.trim().is_empty() {
        debug!("series: nothing selected");
        return SeriesOutput::unavailable();
    }

    let sample_size = config.inference_sample_size;
    let x_type = infer_column_type_with(dataset, x_column, sample_size);
    let y_type = infer_column_type_with(dataset, y_column, sample_size);

    if mode != ChartMode::Scatter && y_type != ColumnType::Numeric {
        debug!("series: y column '{}' is {}, not numeric", y_column, y_type);
        return SeriesOutput::unavailable();
    }

    let filtered;
    let rows = match &options.filter {
        Some(filter) if !filter.is_pass_through() => {
            filtered = dataset.filter(filter);
            debug!("series: filter kept {} of {} rows", filtered.len(), dataset.len());
            &filtered
        }
        _ => dataset,
    };

    match (&options.grouping, mode) {
        (Some(grouping), ChartMode::Bar | ChartMode::Line) => {
            grouped_series(rows, x_column, y_column, grouping, x_type)
        }
        (_, ChartMode::Scatter) => {
            if x_type != ColumnType::Numeric || y_type != ColumnType::Numeric {
                debug!(
                    "series: scatter needs numeric axes, got x={} y={}",
                    x_type, y_type
                );
                return SeriesOutput::unavailable();
            }
            scatter_series(rows, x_column, y_column, x_type)
        }
        _ => plain_series(rows, x_column, y_column, x_type, config),
    }
}

fn grouped_series(
    rows: &Dataset,
    x_column: &str,
    y_column: &str,
    grouping: &Grouping,
    x_type: ColumnType,
) -> SeriesOutput {
    let group_column = grouping.column_or(x_column);
    if !rows.has_column(group_column) {
        debug!("series: group column '{}' does not exist", group_column);
        return SeriesOutput::unavailable();
    }
    let aggregated =
        groupby::group_and_aggregate(rows, group_column, y_column, grouping.aggregate);
    debug!(
        "series: {} groups by '{}' ({})",
        aggregated.len(),
        group_column,
        grouping.aggregate
    );

    let (labels, values): (Vec<String>, Vec<f64>) = aggregated
        .into_iter()
        .map(|row| (row.group_key, row.aggregated_value))
        .unzip();
    let statistics = stats::summarize(&values);

    SeriesOutput {
        series: ChartSeries {
            labels,
            datasets: vec![SeriesDataset {
                label: format!("{} of {} (by {})", grouping.aggregate, y_column, group_column),
                points: SeriesPoints::Values(values),
            }],
        },
        statistics,
        correlation: NA::NA,
        x_type,
        grouped: true,
    }
}

fn scatter_series(
    rows: &Dataset,
    x_column: &str,
    y_column: &str,
    x_type: ColumnType,
) -> SeriesOutput {
    let (xs, ys) = stats::paired_numbers(
        rows.column_values(x_column)
            .zip(rows.column_values(y_column)),
    );
    let correlation = stats::pearson(&xs, &ys);
    debug!("series: scatter with {} points", xs.len());

    let points = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point { x, y })
        .collect();

    SeriesOutput {
        series: ChartSeries {
            labels: Vec::new(),
            datasets: vec![SeriesDataset {
                label: format!("{} (by {})", y_column, x_column),
                points: SeriesPoints::Coordinates(points),
            }],
        },
        statistics: StatisticsSummary::unavailable(),
        correlation,
        x_type,
        grouped: false,
    }
}

fn plain_series(
    rows: &Dataset,
    x_column: &str,
    y_column: &str,
    x_type: ColumnType,
    config: &AnalysisConfig,
) -> SeriesOutput {
    let labels = rows
        .column_values(x_column)
        .map(|cell| axis_label(cell, x_type, &config.date_label_format))
        .collect();
    let values = value::coerce_zero(rows.column_values(y_column));
    let statistics = stats::summarize(&value::coerce_drop(rows.column_values(y_column)));

    SeriesOutput {
        series: ChartSeries {
            labels,
            datasets: vec![SeriesDataset {
                label: format!("{} (by {})", y_column, x_column),
                points: SeriesPoints::Values(values),
            }],
        },
        statistics,
        correlation: NA::NA,
        x_type,
        grouped: false,
    }
}

/// Label for one x cell: a formatted date for date columns, otherwise the
/// cell's string form.
pub fn axis_label(cell: Option<&RawValue>, column_type: ColumnType, date_format: &str) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    if column_type == ColumnType::Date {
        if let Some(date) = cell.to_date() {
            return temporal::format_date_label(&date, date_format);
        }
    }
    cell.to_label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::DEFAULT_DATE_LABEL_FORMAT;

    #[test]
    fn test_axis_label() {
        let date = RawValue::from("2024-03-15T10:00:00");
        assert_eq!(
            axis_label(Some(&date), ColumnType::Date, DEFAULT_DATE_LABEL_FORMAT),
            "2024-03-15"
        );
        assert_eq!(
            axis_label(Some(&date), ColumnType::Categorical, DEFAULT_DATE_LABEL_FORMAT),
            "2024-03-15T10:00:00"
        );
        // stray non-date cells in a date column keep their text
        assert_eq!(
            axis_label(Some(&RawValue::from("n/a")), ColumnType::Date, DEFAULT_DATE_LABEL_FORMAT),
            "n/a"
        );
        assert_eq!(axis_label(None, ColumnType::Date, DEFAULT_DATE_LABEL_FORMAT), "");
    }

    #[test]
    fn test_grouping_falls_back_to_x() {
        assert_eq!(Grouping::new(AggregateKind::Sum).column_or("x"), "x");
        assert_eq!(Grouping::new(AggregateKind::Sum).by(" ").column_or("x"), "x");
        assert_eq!(Grouping::new(AggregateKind::Sum).by("g").column_or("x"), "g");
    }

    #[test]
    fn test_points_json_shape() {
        let values = serde_json::to_string(&SeriesPoints::Values(vec![1.0])).unwrap();
        assert_eq!(values, "[1.0]");

        let coords =
            serde_json::to_string(&SeriesPoints::Coordinates(vec![Point { x: 1.0, y: 2.0 }]))
                .unwrap();
        assert_eq!(coords, r#"[{"x":1.0,"y":2.0}]"#);
    }
}
