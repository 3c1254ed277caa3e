//! Trend labelling for price time series.
//!
//! Continuous trend labelling (CTL) and dynamic-programming oracle
//! labellers, returns estimation with fee models, parameter optimisation,
//! label tuning and smoothing, plus an interactive chart viewer.

pub mod config;
pub mod data;
pub mod error;
pub mod labelling;
pub mod optimisation;
pub mod returns;
pub mod tuning;
pub mod types;
pub mod viz;

pub use error::{Result, TrendlabError};
pub use types::Label;
