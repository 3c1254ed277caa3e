use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendlabError {
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Optimisation error: {0}")]
    Optimisation(String),

    #[error("Tuning error: {0}")]
    Tuning(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrendlabError>;
