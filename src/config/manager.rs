use std::{
    fs,
    path::{Path, PathBuf},
};

use log::error;

use crate::{ModelErr, Result};

/// Locates the configuration files of the project.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    auth_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Creates a new `ConfigManager`.
    ///
    /// # Arguments
    /// * `config_path` - The path to the JSON file holding the configuration.
    /// * `auth_path` - The path to the file holding authentication settings. It is recorded but
    ///   never read here.
    pub fn new<P: Into<PathBuf>>(config_path: P, auth_path: Option<P>) -> Self {
        Self {
            config_path: config_path.into(),
            auth_path: auth_path.map(Into::into),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn auth_path(&self) -> Option<&Path> {
        self.auth_path.as_deref()
    }

    /// Loads the configuration as a generic JSON value.
    ///
    /// Failures are logged before being returned.
    ///
    /// # Errors
    /// `ModelErr::ConfigNotFound` if the file doesn't exist, `ModelErr::Io` if it can't be read
    /// and `ModelErr::ConfigParse` if it isn't valid JSON.
    pub fn load_config(&self) -> Result<serde_json::Value> {
        self.read_config()
            .inspect_err(|e| error!("error loading config file: {e}"))
    }

    fn read_config(&self) -> Result<serde_json::Value> {
        if !self.config_path.exists() {
            return Err(ModelErr::ConfigNotFound {
                path: self.config_path.clone(),
            });
        }

        let content = fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
