use super::Dataset;
use crate::{ModelErr, Result};

/// An ordered store of raw datasets.
///
/// Datasets are looked up by their position, which shifts down when an earlier one is removed.
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    datasets: Vec<Dataset>,
}

impl DatasetCollection {
    /// Creates a new empty `DatasetCollection`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `dataset` at the end of the collection.
    pub fn add_dataset(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
    }

    /// Returns the dataset at `index`.
    ///
    /// # Errors
    /// `ModelErr::IndexOutOfRange` if `index` is not below the dataset count.
    pub fn get_dataset(&self, index: usize) -> Result<&Dataset> {
        self.datasets
            .get(index)
            .ok_or(ModelErr::IndexOutOfRange {
                index,
                len: self.datasets.len(),
            })
    }

    /// Returns every dataset in insertion order.
    pub fn get_datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn get_dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Removes and returns the dataset at `index`, shifting the following ones down.
    ///
    /// # Errors
    /// `ModelErr::IndexOutOfRange` if `index` is not below the dataset count.
    pub fn remove_dataset(&mut self, index: usize) -> Result<Dataset> {
        let len = self.datasets.len();
        if index >= len {
            return Err(ModelErr::IndexOutOfRange { index, len });
        }

        Ok(self.datasets.remove(index))
    }

    pub fn clear_datasets(&mut self) {
        self.datasets.clear();
    }
}
