use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Deserialize;

use super::Dataset;
use crate::{ModelErr, Result};

/// Identifies a dataset held outside the process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetRef {
    /// The dataset's identifier at its source, e.g. `owner/name`.
    pub source_id: String,
    /// The file within the dataset.
    pub file_name: String,
    /// Whether a previously fetched copy may be reused.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

impl DatasetRef {
    pub fn new<S: Into<String>, F: Into<String>>(source_id: S, file_name: F, use_cache: bool) -> Self {
        Self {
            source_id: source_id.into(),
            file_name: file_name.into(),
            use_cache,
        }
    }
}

/// Resolves dataset references into datasets.
pub trait DatasetSource {
    /// Fetches the dataset `dataset_ref` points to.
    ///
    /// # Errors
    /// Implementation defined, e.g. the dataset doesn't exist or can't be parsed.
    fn resolve(&mut self, dataset_ref: &DatasetRef) -> Result<Dataset>;
}

/// A [`DatasetSource`] reading CSV files laid out as `root/<source_id>/<file_name>`.
///
/// References with `use_cache` set are parsed once and served from memory afterwards.
#[derive(Debug, Default)]
pub struct LocalSource {
    root: PathBuf,
    cache: HashMap<(String, String), Dataset>,
}

impl LocalSource {
    /// Creates a new `LocalSource`.
    ///
    /// # Arguments
    /// * `root` - The directory datasets are looked up in.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path `dataset_ref` resolves to.
    pub fn path_of(&self, dataset_ref: &DatasetRef) -> PathBuf {
        self.root
            .join(&dataset_ref.source_id)
            .join(&dataset_ref.file_name)
    }

    /// Returns the amount of cached datasets.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl DatasetSource for LocalSource {
    fn resolve(&mut self, dataset_ref: &DatasetRef) -> Result<Dataset> {
        let key = (dataset_ref.source_id.clone(), dataset_ref.file_name.clone());
        if dataset_ref.use_cache {
            if let Some(dataset) = self.cache.get(&key) {
                debug!("cache hit for {}/{}", key.0, key.1);
                return Ok(dataset.clone());
            }
        }

        let path = self.path_of(dataset_ref);
        if !path.is_file() {
            return Err(ModelErr::DatasetNotFound { path });
        }

        info!("reading dataset from {}", path.display());
        let dataset = Dataset::from_csv_path(&path)?;

        if dataset_ref.use_cache {
            self.cache.insert(key, dataset.clone());
        }

        Ok(dataset)
    }
}
