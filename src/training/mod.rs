mod params;
mod setup;
mod training_core;

pub use params::{BIAS_KEY, Gradients, Parameters, TrainingData, WEIGHTS_KEY};
pub use setup::LinearRegressionSetup;
pub use training_core::TrainingCore;
