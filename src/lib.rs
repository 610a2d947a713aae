//! Analysis engine for charting uploaded tabular files.
//!
//! Rows parsed from CSV or Excel are classified column by column
//! ([`inference`]), summarised ([`stats`]), bucketed ([`groupby`]) and finally
//! turned into render-ready series ([`vis`]). Datasets and per-dataset chart
//! settings persist through a key-value store ([`storage`]).

pub mod config;
pub mod dataset;
pub mod error;
pub mod groupby;
pub mod inference;
pub mod io;
pub mod na;
pub mod stats;
pub mod storage;
pub mod temporal;
pub mod value;
pub mod vis;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use dataset::{Dataset, Row, RowFilter};
pub use error::{Error, Result, StorageError};
pub use groupby::{group_and_aggregate, AggregateKind, AggregatedRow};
pub use inference::{describe_columns, infer_column_type, ColumnDescriptor, ColumnType};
pub use na::NA;
pub use stats::{correlation, descriptive_statistics, StatisticsSummary};
pub use storage::{ChartSettings, DatasetStore, FileStore, KeyValueStore, MemoryStore};
pub use value::RawValue;
pub use vis::{build_series, ChartMode, ChartSeries, Grouping, RenderOptions, SeriesOptions, SeriesOutput};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
