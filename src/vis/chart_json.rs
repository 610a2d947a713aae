//! Renderer producing a declarative JSON chart config
//!
//! The output follows the `{type, data: {labels, datasets}, options}` layout
//! used by browser charting libraries, so it can be handed to one unchanged.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::vis::config::{AxisOptions, AxisScale, ChartMode, RenderOptions, Renderer};
use crate::vis::series::{ChartSeries, SeriesPoints};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSpecRenderer;

impl JsonSpecRenderer {
    pub fn new() -> Self {
        JsonSpecRenderer
    }
}

impl Renderer for JsonSpecRenderer {
    type Output = Value;

    fn render(&self, series: &ChartSeries, options: &RenderOptions) -> Result<Value> {
        if series.is_empty() {
            return Err(Error::EmptyData("描画する系列がありません".into()));
        }

        let datasets = series
            .datasets
            .iter()
            .map(|dataset| -> Result<Value> {
                let data = match &dataset.points {
                    SeriesPoints::Values(values) => serde_json::to_value(values)?,
                    SeriesPoints::Coordinates(points) => serde_json::to_value(points)?,
                };
                Ok(json!({
                    "label": dataset.label,
                    "data": data,
                    "backgroundColor": options.color,
                    "borderColor": options.color,
                    "borderWidth": 1,
                    "fill": false,
                }))
            })
            .collect::<Result<Vec<Value>>>()?;

        let chart_type = match options.kind {
            ChartMode::Bar => "bar",
            ChartMode::Line => "line",
            ChartMode::Scatter => "scatter",
        };

        Ok(json!({
            "type": chart_type,
            "data": {
                "labels": series.labels,
                "datasets": datasets,
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "position": "top" },
                    "title": { "display": true, "text": options.title },
                    "datalabels": { "display": options.show_labels },
                },
                "scales": {
                    "x": axis_json(&options.x_axis),
                    "y": axis_json(&options.y_axis),
                },
            },
        }))
    }
}

fn axis_json(axis: &AxisOptions) -> Value {
    let mut axis_json = json!({
        "type": match axis.scale {
            AxisScale::Category => "category",
            AxisScale::Time => "time",
            AxisScale::Linear => "linear",
        },
        "title": { "display": true, "text": axis.title },
        "beginAtZero": axis.begin_at_zero,
    });
    if axis.scale == AxisScale::Time {
        axis_json["time"] = json!({ "unit": "day", "tooltipFormat": "yyyy-MM-dd" });
    }
    axis_json
}
