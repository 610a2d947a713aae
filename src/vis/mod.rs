//! Module turning datasets into render-ready chart series
//!
//! The builder decides *what* is charted: plain label/value pairs, grouped
//! aggregates, or scatter coordinates, along with the statistics or
//! correlation shown next to the chart. Drawing is left to a [`Renderer`].

// Module structure
pub mod config;
pub mod series;
pub mod chart_json;

// Re-export public items
pub use self::config::{AxisOptions, AxisScale, ChartMode, RenderOptions, Renderer, DEFAULT_COLOR};
pub use self::series::{
    axis_label, build_series, build_series_with, ChartSeries, Grouping, Point, SeriesDataset,
    SeriesOptions, SeriesOutput, SeriesPoints,
};
pub use self::chart_json::JsonSpecRenderer;
