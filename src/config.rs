//! Analysis configuration
//!
//! Every setting has a default, so an empty TOML or YAML document is a valid
//! configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::groupby::AggregateKind;
use crate::temporal::{self, DEFAULT_DATE_LABEL_FORMAT};
use crate::vis::Grouping;

/// Number of leading rows inspected when inferring a column type.
pub const DEFAULT_INFERENCE_SAMPLE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub inference_sample_size: usize,
    /// strftime pattern used for date axis labels
    pub date_label_format: String,
    pub default_aggregate: AggregateKind,
    pub storage: StorageConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            inference_sample_size: DEFAULT_INFERENCE_SAMPLE_SIZE,
            date_label_format: DEFAULT_DATE_LABEL_FORMAT.to_string(),
            default_aggregate: AggregateKind::Sum,
            storage: StorageConfig::default(),
        }
    }
}

/// Key layout of the dataset catalogue inside a key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub list_key: String,
    pub data_prefix: String,
    pub settings_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            list_key: "data_viz_datasets_list".to_string(),
            data_prefix: "data_viz_data_".to_string(),
            settings_prefix: "data_viz_settings_".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Grouping offered when the user first turns grouping on.
    pub fn default_grouping(&self) -> Grouping {
        Grouping::new(self.default_aggregate)
    }

    /// Loads a `.toml`, `.yaml` or `.yml` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match extension_of(path).as_deref() {
            Some("toml") => Self::from_toml_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(Error::Config(format!(
                "設定ファイルの拡張子が不明です: {}",
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.inference_sample_size == 0 {
            return Err(Error::Config(
                "inference_sample_size は1以上である必要があります".into(),
            ));
        }
        if !temporal::is_valid_format(&self.date_label_format) {
            return Err(Error::Config(format!(
                "日付書式が不正です: {}",
                self.date_label_format
            )));
        }
        self.storage.validate()
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.list_key.is_empty() || self.data_prefix.is_empty() || self.settings_prefix.is_empty() {
            return Err(Error::Config("ストレージのキーは空にできません".into()));
        }
        if self.data_prefix == self.settings_prefix {
            return Err(Error::Config(
                "data_prefix と settings_prefix は異なる必要があります".into(),
            ));
        }
        Ok(())
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
