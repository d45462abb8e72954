mod manager;
mod training;

pub use manager::ConfigManager;
pub use training::{DatasetConfig, TrainingConfig};
