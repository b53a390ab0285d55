// Chart-data post-processing for access-log aggregates.

pub mod aggregate;
pub mod threshold;
pub mod label;
pub mod conf;
pub mod error;

pub use aggregate::CategoryAggregate;
pub use threshold::{filter_other, CategoryThresholder};
pub use label::{autopct_format, PercentLabel};
pub use conf::ChartConfig;
pub use error::{ChartError, ChartResult};

pub const DEFAULT_THRESHOLD_PCT: f64 = 0.03;
pub const DEFAULT_OTHER_LABEL: &str = "Other";
