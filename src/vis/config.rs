//! Chart kinds and the declarative options bag handed to a renderer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inference::ColumnType;
use crate::vis::series::{ChartSeries, SeriesOutput};

pub const DEFAULT_COLOR: &str = "rgba(75, 192, 192, 0.6)";

/// Chart kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Bar,
    Line,
    Scatter,
}

impl ChartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Bar => "bar",
            ChartMode::Line => "line",
            ChartMode::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartMode::Bar),
            "line" => Ok(ChartMode::Line),
            "scatter" => Ok(ChartMode::Scatter),
            other => Err(Error::InvalidInput(format!("未知のチャート種別です: {}", other))),
        }
    }
}

/// How an axis spaces its ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Category,
    Time,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub title: String,
    pub scale: AxisScale,
    pub begin_at_zero: bool,
}

/// Declarative options for the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub title: String,
    pub kind: ChartMode,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub color: String,
    pub show_labels: bool,
}

impl RenderOptions {
    /// Default options for a built series.
    ///
    /// Date x columns get a time axis unless the chart is grouped; scatter
    /// charts use linear scales on both axes.
    pub fn for_selection(
        x_column: &str,
        y_column: &str,
        mode: ChartMode,
        output: &SeriesOutput,
    ) -> Self {
        let x_scale = match mode {
            ChartMode::Scatter => AxisScale::Linear,
            _ if output.x_type == ColumnType::Date && !output.grouped => AxisScale::Time,
            _ => AxisScale::Category,
        };

        RenderOptions {
            title: format!("{} vs {} ({})", y_column, x_column, mode),
            kind: mode,
            x_axis: AxisOptions {
                title: x_column.to_string(),
                scale: x_scale,
                begin_at_zero: false,
            },
            y_axis: AxisOptions {
                title: y_column.to_string(),
                scale: AxisScale::Linear,
                begin_at_zero: mode != ChartMode::Scatter,
            },
            color: DEFAULT_COLOR.to_string(),
            show_labels: false,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// Render collaborator: turns a series and its options into some output.
pub trait Renderer {
    type Output;

    fn render(&self, series: &ChartSeries, options: &RenderOptions) -> Result<Self::Output>;
}
