use crate::{
    ModelErr, Result,
    data::{DatasetRef, NormalisationMethod},
};

/// Everything needed to set a [`TrainingCore`](super::TrainingCore) up for linear regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionSetup {
    pub feature_names: Vec<String>,
    pub label_name: String,
    pub learning_rate: f64,
    pub normalisation: NormalisationMethod,
    /// Where to fetch the dataset from when it isn't handed over directly.
    pub source: Option<DatasetRef>,
}

impl LinearRegressionSetup {
    /// Creates a new `LinearRegressionSetup` with z-score normalisation and no dataset source.
    ///
    /// # Arguments
    /// * `feature_names` - The input columns, in order.
    /// * `label_name` - The target column.
    /// * `learning_rate` - The gradient descent step length.
    pub fn new<I, S, L>(feature_names: I, label_name: L, learning_rate: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: Into<String>,
    {
        Self {
            feature_names: feature_names.into_iter().map(Into::into).collect(),
            label_name: label_name.into(),
            learning_rate,
            normalisation: NormalisationMethod::default(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: DatasetRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_normalisation(mut self, normalisation: NormalisationMethod) -> Self {
        self.normalisation = normalisation;
        self
    }

    /// Checks that the setup can describe a training run.
    ///
    /// # Errors
    /// `ModelErr::InvalidInput` if there are no features or the learning rate isn't a positive
    /// finite number.
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(ModelErr::InvalidInput(
                "at least one feature is required".into(),
            ));
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ModelErr::InvalidInput(format!(
                "the learning rate must be positive, got {}",
                self.learning_rate
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert!(LinearRegressionSetup::new(["TV"], "Sales", 1e-8).validate().is_ok());
        assert!(
            LinearRegressionSetup::new(Vec::<String>::new(), "Sales", 1e-8)
                .validate()
                .is_err()
        );

        for lr in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let setup = LinearRegressionSetup::new(["TV"], "Sales", lr);
            assert!(matches!(setup.validate(), Err(ModelErr::InvalidInput(_))));
        }
    }
}
