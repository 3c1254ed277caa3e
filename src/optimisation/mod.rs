pub mod bounds;
pub mod optimiser;

pub use bounds::{default_bounds, ParamBound};
pub use optimiser::{OptimisationResult, Optimiser, OptimiserConfig};
