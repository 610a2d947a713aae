use serde::{Deserialize, Serialize};

use crate::dataset::RowFilter;
use crate::vis::{ChartMode, Grouping, RenderOptions, SeriesOptions, SeriesOutput};

/// Chart choices remembered per dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSettings {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub mode: ChartMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<RowFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub show_labels: bool,
}

impl ChartSettings {
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            grouping: self.grouping.clone(),
            filter: self.filter.clone(),
        }
    }

    /// Default render options with the saved overrides applied.
    pub fn render_options(&self, output: &SeriesOutput) -> RenderOptions {
        let x = self.x_column.as_deref().unwrap_or_default();
        let y = self.y_column.as_deref().unwrap_or_default();
        let mut options =
            RenderOptions::for_selection(x, y, self.mode, output).with_labels(self.show_labels);
        if let Some(title) = &self.title {
            options = options.with_title(title.as_str());
        }
        if let Some(color) = &self.color {
            options = options.with_color(color.as_str());
        }
        options
    }
}
