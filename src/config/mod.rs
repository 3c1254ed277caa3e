pub mod traits;
pub mod labelling;
pub mod optimisation;
pub mod manager;

mod fees;

pub use manager::{ConfigManager, AppConfig};
pub use labelling::LabellingConfig;
pub use optimisation::OptimisationConfig;
pub use traits::ConfigSection;
