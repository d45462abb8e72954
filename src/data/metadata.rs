use std::collections::HashMap;

use log::debug;

use super::{ColumnStats, Dataset, NormalisationMethod};
use crate::{
    ModelErr, Result,
    backend::{Backend, CpuBackend},
};

/// A dataset together with the columns a model reads from it.
///
/// The metadata turns the tabular dataset into what the training math consumes: every feature
/// and label column is normalised (keeping the per-column statistics around so new inputs can be
/// normalised the same way) and laid out as a `rows × 1` column vector on the backend.
#[derive(Debug, Clone)]
pub struct DatasetMetadata<B: Backend = CpuBackend> {
    dataset: Dataset,
    features: Vec<String>,
    labels: Vec<String>,
    method: NormalisationMethod,

    normalised: Dataset,
    stats: HashMap<String, ColumnStats>,
    normalisation_computed: bool,

    transposed_features: HashMap<String, B::Matrix>,
    transposed_labels: HashMap<String, B::Matrix>,
}

impl<B: Backend> DatasetMetadata<B> {
    /// Creates a new `DatasetMetadata`.
    ///
    /// # Arguments
    /// * `dataset` - The dataset to describe.
    /// * `features` - The names of the model's input columns, in order.
    /// * `labels` - The names of the model's target columns, in order.
    ///
    /// # Returns
    /// The metadata, `ModelErr::InvalidInput` if there are no features or no labels, or
    /// `ModelErr::MissingColumn` if a name is not a column of `dataset`.
    pub fn new<F, L>(dataset: Dataset, features: F, labels: L) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let features: Vec<String> = features.into_iter().map(Into::into).collect();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if features.is_empty() || labels.is_empty() {
            return Err(ModelErr::InvalidInput(
                "at least one feature and one label are required".into(),
            ));
        }

        for name in features.iter().chain(&labels) {
            dataset.require_column(name)?;
        }

        Ok(Self {
            dataset,
            features,
            labels,
            method: NormalisationMethod::default(),
            normalised: Dataset::new(),
            stats: HashMap::new(),
            normalisation_computed: false,
            transposed_features: HashMap::new(),
            transposed_labels: HashMap::new(),
        })
    }

    /// Sets the normalisation method used by the next computation.
    pub fn with_method(mut self, method: NormalisationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn method(&self) -> NormalisationMethod {
        self.method
    }

    pub fn get_feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn get_label_count(&self) -> usize {
        self.labels.len()
    }

    /// Normalises every feature and label column into the normalised dataset.
    ///
    /// Does nothing if the normalisation was already computed, unless `force_recompute` is set.
    ///
    /// # Arguments
    /// * `force_recompute` - Whether to overwrite a previous computation.
    ///
    /// # Errors
    /// `ModelErr::EmptyDataset` if the dataset has no rows.
    pub fn compute_column_wise_normalisation(&mut self, force_recompute: bool) -> Result<()> {
        if self.normalisation_computed && !force_recompute {
            return Ok(());
        }

        let mut normalised = Dataset::new();
        let mut stats = HashMap::new();

        for name in self.features.iter().chain(&self.labels) {
            if stats.contains_key(name) {
                continue;
            }

            let values = self.dataset.require_column(name)?;
            let column_stats = ColumnStats::fit(self.method, values)?;
            normalised.push_column(name.clone(), column_stats.apply(values))?;
            stats.insert(name.clone(), column_stats);
        }

        debug!(
            rows = normalised.nrows(),
            cols = normalised.ncols(),
            force = force_recompute;
            "computed column-wise normalisation"
        );

        self.normalised = normalised;
        self.stats = stats;
        self.normalisation_computed = true;
        Ok(())
    }

    /// Returns the normalised dataset, empty until the normalisation is computed.
    pub fn get_column_wise_normalisation(&self) -> &Dataset {
        &self.normalised
    }

    pub fn get_column_wise_normalisation_computed(&self) -> bool {
        self.normalisation_computed
    }

    /// Returns the statistics `name` was normalised with.
    pub fn column_statistics(&self, name: &str) -> Option<&ColumnStats> {
        self.stats.get(name)
    }

    /// Lays every normalised feature and label column out as a column vector.
    ///
    /// Computes the normalisation first if it hasn't been computed yet.
    pub fn transpose_normalised_column_vectors(&mut self) -> Result<()> {
        if !self.normalisation_computed {
            self.compute_column_wise_normalisation(false)?;
        }

        let transpose = |names: &[String]| -> Result<HashMap<String, B::Matrix>> {
            names
                .iter()
                .map(|name| {
                    let values = self.normalised.require_column(name)?;
                    Ok((name.clone(), B::column_vector(values)))
                })
                .collect()
        };

        let features = transpose(&self.features)?;
        let labels = transpose(&self.labels)?;

        self.transposed_features = features;
        self.transposed_labels = labels;
        Ok(())
    }

    /// Returns the feature column vectors by name, empty until transposed.
    pub fn get_transposed_normalised_features(&self) -> &HashMap<String, B::Matrix> {
        &self.transposed_features
    }

    /// Returns the label column vectors by name, empty until transposed.
    pub fn get_transposed_normalised_labels(&self) -> &HashMap<String, B::Matrix> {
        &self.transposed_labels
    }

    /// Joins the transposed feature columns into a `rows × features` matrix, in feature order.
    pub fn feature_matrix(&self) -> Result<B::Matrix> {
        Self::stack(&self.features, &self.transposed_features)
    }

    /// Joins the transposed label columns into a `rows × labels` matrix, in label order.
    pub fn label_matrix(&self) -> Result<B::Matrix> {
        Self::stack(&self.labels, &self.transposed_labels)
    }

    /// Normalises the feature columns of another dataset with this dataset's statistics.
    ///
    /// # Arguments
    /// * `dataset` - Any dataset holding (at least) the feature columns.
    ///
    /// # Returns
    /// A `rows × features` matrix or an error if the normalisation wasn't computed yet or a
    /// feature column is missing.
    pub fn normalise_features(&self, dataset: &Dataset) -> Result<B::Matrix> {
        if !self.normalisation_computed {
            return Err(ModelErr::Precondition(
                "the column-wise normalisation has not been computed",
            ));
        }

        let columns = self
            .features
            .iter()
            .map(|name| {
                let stats = self
                    .stats
                    .get(name)
                    .ok_or(ModelErr::Precondition("missing feature statistics"))?;
                let values = dataset.require_column(name)?;
                Ok(B::column_vector(&stats.apply(values)))
            })
            .collect::<Result<Vec<_>>>()?;

        B::hstack(&columns.iter().collect::<Vec<_>>())
    }

    fn stack(names: &[String], columns: &HashMap<String, B::Matrix>) -> Result<B::Matrix> {
        let columns = names
            .iter()
            .map(|name| {
                columns.get(name).ok_or(ModelErr::Precondition(
                    "the normalised column vectors have not been transposed",
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        B::hstack(&columns)
    }
}
