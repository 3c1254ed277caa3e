pub mod estimator;
pub mod fees;

pub use estimator::{ReturnEstimator, ReturnsEstimatorWithFees, SimpleReturnEstimator};
pub use fees::FeesConfig;
