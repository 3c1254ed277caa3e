pub mod remaining_value;
pub mod smoothing;

pub use remaining_value::{RemainingValueTuner, TuneOptions};
pub use smoothing::{Direction, LinearWeightedAverage, SimpleMovingAverage, Smoother};
