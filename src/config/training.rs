use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    ModelErr, Result,
    data::{DatasetRef, NormalisationMethod},
    training::LinearRegressionSetup,
};

/// Where the training dataset lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetConfig {
    #[serde(flatten)]
    pub dataset_ref: DatasetRef,
    /// The directory local datasets are looked up in.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// A training run as described by the JSON configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingConfig {
    pub features: Vec<String>,
    pub label: String,
    pub learning_rate: f64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_log_every")]
    pub log_every: usize,
    #[serde(default)]
    pub normalisation: NormalisationMethod,
    pub dataset: DatasetConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from("datasets")
}

fn default_epochs() -> usize {
    1000
}

fn default_log_every() -> usize {
    100
}

impl TrainingConfig {
    /// Reads a `TrainingConfig` out of a loaded configuration.
    ///
    /// # Arguments
    /// * `value` - The configuration, as returned by `ConfigManager::load_config`.
    ///
    /// # Errors
    /// `ModelErr::InvalidConfig` if fields are missing, mistyped or out of range.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| ModelErr::InvalidConfig(e.to_string()))?;

        if config.log_every == 0 {
            return Err(ModelErr::InvalidConfig("log_every must be positive".into()));
        }

        config
            .setup()
            .validate()
            .map_err(|e| ModelErr::InvalidConfig(e.to_string()))?;

        Ok(config)
    }

    /// Builds the setup of the training run this configuration describes.
    pub fn setup(&self) -> LinearRegressionSetup {
        LinearRegressionSetup::new(&self.features, &self.label, self.learning_rate)
            .with_normalisation(self.normalisation)
            .with_source(self.dataset.dataset_ref.clone())
    }
}
