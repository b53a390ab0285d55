use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid threshold: {0} (expected a finite share between 0 and 1)")]
    InvalidThreshold(f64),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// A magnitude or the aggregate total no longer fits in `u64`
    #[error("Magnitude overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

pub type ChartResult<T> = Result<T, ChartError>;
