use log::{debug, info};

use super::{Gradients, LinearRegressionSetup, Parameters, TrainingData};
use crate::{
    ModelErr, Result,
    backend::{Backend, CpuBackend},
    data::{Dataset, DatasetMetadata, DatasetSource},
    loss::{LossFn, Mse},
    optimization::{GradientDescent, Optimizer},
};

/// The state of a set up core.
#[derive(Debug, Clone)]
struct Configured<B: Backend> {
    metadata: DatasetMetadata<B>,
    data: TrainingData<B>,
    params: Parameters<B>,
    optimizer: GradientDescent,
    input_size: usize,
    output_size: usize,
}

/// Single-target linear regression trained with batch gradient descent.
///
/// The core owns a dataset, its metadata and the model parameters, and exposes each step of
/// training separately: the caller drives the loop as
/// `forward_propagation` → `back_propagation` → `update_parameters`.
///
/// A core starts unconfigured. `setup_linear_regression_training` configures it and
/// `flush_training_setup` brings it back; while unconfigured every step fails with
/// `ModelErr::Precondition`.
#[derive(Debug, Clone)]
pub struct TrainingCore<B: Backend = CpuBackend> {
    state: Option<Configured<B>>,
    loss_fn: Mse,
}

impl<B: Backend> Default for TrainingCore<B> {
    fn default() -> Self {
        Self {
            state: None,
            loss_fn: Mse::new(),
        }
    }
}

const NOT_SET_UP: &str = "the linear regression training has not been set up";

impl<B: Backend> TrainingCore<B> {
    /// Creates a new unconfigured `TrainingCore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the core up to train on `dataset`.
    ///
    /// Normalises and transposes the feature and label columns, then initialises the weights to
    /// zero and the bias to the mean of the label column, so an untrained model predicts the
    /// mean whatever its input. A previous setup is replaced; if this one fails the previous
    /// state is kept.
    ///
    /// # Arguments
    /// * `setup` - The features, label, learning rate and normalisation to use. Its `source` is
    ///   ignored, `dataset` is used instead.
    /// * `dataset` - The training dataset.
    pub fn setup_linear_regression_training(
        &mut self,
        setup: &LinearRegressionSetup,
        dataset: Dataset,
    ) -> Result<()> {
        setup.validate()?;

        let label_mean = {
            let labels = dataset.require_column(&setup.label_name)?;
            if labels.is_empty() {
                return Err(ModelErr::EmptyDataset);
            }
            labels.iter().sum::<f64>() / labels.len() as f64
        };

        let mut metadata = DatasetMetadata::new(
            dataset,
            setup.feature_names.iter().cloned(),
            [setup.label_name.clone()],
        )?
        .with_method(setup.normalisation);
        metadata.compute_column_wise_normalisation(false)?;
        metadata.transpose_normalised_column_vectors()?;

        let features = metadata.feature_matrix()?;
        let labels = B::flatten(&metadata.label_matrix()?);
        let data = TrainingData::new(features, labels)?;

        let input_size = metadata.get_feature_count();
        let params = Parameters::new(B::full(input_size, 0.0), label_mean);

        info!(
            samples = data.sample_count(),
            features = input_size,
            learning_rate = setup.learning_rate;
            "linear regression training set up"
        );

        self.state = Some(Configured {
            metadata,
            data,
            params,
            optimizer: GradientDescent::new(setup.learning_rate),
            input_size,
            output_size: 1,
        });

        Ok(())
    }

    /// Like [`TrainingCore::setup_linear_regression_training`] but fetching the dataset the
    /// setup's `source` points to.
    ///
    /// # Errors
    /// `ModelErr::Precondition` if the setup has no source, or whatever `source` fails with.
    pub fn setup_from_source<S: DatasetSource>(
        &mut self,
        setup: &LinearRegressionSetup,
        source: &mut S,
    ) -> Result<()> {
        let dataset_ref = setup
            .source
            .as_ref()
            .ok_or(ModelErr::Precondition("the setup has no dataset source"))?;

        let dataset = source.resolve(dataset_ref)?;
        self.setup_linear_regression_training(setup, dataset)
    }

    pub fn get_training_setup_completed(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the training dataset, `None` while unconfigured.
    pub fn get_dataset(&self) -> Option<&Dataset> {
        self.state.as_ref().map(|s| s.metadata.dataset())
    }

    /// Returns the training dataset's metadata, `None` while unconfigured.
    pub fn get_metadata(&self) -> Option<&DatasetMetadata<B>> {
        self.state.as_ref().map(|s| &s.metadata)
    }

    /// Returns the feature count, `0` while unconfigured.
    pub fn get_input_size(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.input_size)
    }

    /// Returns the target count, `1` once configured and `0` before.
    pub fn get_output_size(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.output_size)
    }

    pub fn get_learning_rate(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.optimizer.learning_rate())
    }

    /// Returns the current parameters, `None` while unconfigured.
    ///
    /// They can only be changed through [`TrainingCore::update_parameters`].
    pub fn get_parameters(&self) -> Option<&Parameters<B>> {
        self.state.as_ref().map(|s| &s.params)
    }

    /// Returns the normalised training features and labels.
    pub fn training_data(&self) -> Result<&TrainingData<B>> {
        Ok(&self.configured()?.data)
    }

    /// Predicts the (normalised) label of every training sample with the current parameters.
    ///
    /// # Returns
    /// One prediction per training sample, in row order.
    pub fn forward_propagation(&self) -> Result<B::Vector> {
        let state = self.configured()?;
        Self::affine(&state.params, state.data.features())
    }

    /// Predicts the label of every row of `dataset` with the current parameters.
    ///
    /// The feature columns are normalised with the training statistics before being used.
    ///
    /// # Arguments
    /// * `dataset` - Any dataset holding the feature columns.
    ///
    /// # Returns
    /// One prediction per row of `dataset`.
    pub fn predict(&self, dataset: &Dataset) -> Result<B::Vector> {
        let state = self.configured()?;
        let x = state.metadata.normalise_features(dataset)?;
        Self::affine(&state.params, &x)
    }

    /// Maps label values from the normalised scale the model trains on back to the label
    /// column's units, using the training statistics.
    ///
    /// # Arguments
    /// * `y_hat` - Values on the normalised label scale, usually predictions.
    pub fn denormalise_label(&self, y_hat: &B::Vector) -> Result<Vec<f64>> {
        let metadata = &self.configured()?.metadata;
        let stats = metadata
            .labels()
            .first()
            .and_then(|label| metadata.column_statistics(label))
            .ok_or(ModelErr::Precondition("missing label statistics"))?;

        Ok(stats.invert(&B::to_host(y_hat)))
    }

    /// Computes the gradient of the loss against the training data.
    ///
    /// Equivalent to `back_propagation_against(y_hat, self.training_data()?)`.
    ///
    /// # Arguments
    /// * `y_hat` - One prediction per training sample, usually from `forward_propagation`.
    pub fn back_propagation(&self, y_hat: &B::Vector) -> Result<Gradients<B>> {
        let state = self.configured()?;
        self.back_propagation_against(y_hat, &state.data)
    }

    /// Computes the gradient of the loss of `y_hat` against `data`:
    /// `dW_0 = Xᵀ · (y_hat - y) / m` and `db = Σ(y_hat - y) / m`.
    ///
    /// # Arguments
    /// * `y_hat` - One prediction per sample of `data`.
    /// * `data` - The features and labels the predictions are compared to.
    ///
    /// # Errors
    /// `ModelErr::ShapeMismatch` if the prediction count differs from the sample count or the
    /// feature count differs from the model's input size.
    pub fn back_propagation_against(
        &self,
        y_hat: &B::Vector,
        data: &TrainingData<B>,
    ) -> Result<Gradients<B>> {
        let state = self.configured()?;

        let (_, nfeatures) = B::shape(data.features());
        if nfeatures != state.input_size {
            return Err(ModelErr::ShapeMismatch {
                what: "training features",
                got: nfeatures,
                expected: state.input_size,
            });
        }

        if B::len(y_hat) != data.sample_count() {
            return Err(ModelErr::ShapeMismatch {
                what: "predictions",
                got: B::len(y_hat),
                expected: data.sample_count(),
            });
        }

        let delta = self.loss_fn.loss_prime::<B>(y_hat, data.labels())?;
        let d_w = B::t_mat_vec(data.features(), &delta)?;
        let d_b = B::sum(&delta);

        Ok(Gradients::new(d_w, d_b))
    }

    /// Computes the loss of `y_hat` against the training labels.
    pub fn compute_loss(&self, y_hat: &B::Vector) -> Result<f64> {
        let state = self.configured()?;
        self.loss_fn.loss::<B>(y_hat, state.data.labels())
    }

    /// Takes one gradient descent step: `p ← p - learning_rate * g` for every parameter.
    ///
    /// The parameters are only replaced once the whole step was computed, a failing update
    /// leaves them untouched.
    ///
    /// # Errors
    /// `ModelErr::ShapeMismatch` if there isn't one weight gradient per feature.
    pub fn update_parameters(&mut self, gradients: &Gradients<B>) -> Result<()> {
        let state = self.configured_mut()?;

        if B::len(gradients.d_w()) != state.input_size {
            return Err(ModelErr::ShapeMismatch {
                what: "weight gradients",
                got: B::len(gradients.d_w()),
                expected: state.input_size,
            });
        }

        let params = state.optimizer.update_params(&state.params, gradients)?;
        state.params = params;
        Ok(())
    }

    /// Drops the dataset, metadata and parameters, leaving the core unconfigured.
    pub fn flush_training_setup(&mut self) {
        if self.state.take().is_some() {
            debug!("training setup flushed");
        }
    }

    fn affine(params: &Parameters<B>, x: &B::Matrix) -> Result<B::Vector> {
        let wx = B::mat_vec(x, params.w_0())?;
        Ok(B::add_scalar(&wx, params.b()))
    }

    fn configured(&self) -> Result<&Configured<B>> {
        self.state.as_ref().ok_or(ModelErr::Precondition(NOT_SET_UP))
    }

    fn configured_mut(&mut self) -> Result<&mut Configured<B>> {
        self.state.as_mut().ok_or(ModelErr::Precondition(NOT_SET_UP))
    }
}
