use super::LossFn;
use crate::{ModelErr, Result, backend::Backend};

/// Mean squared error loss function, halved: `(1 / 2m) * Σ(y_pred - y)²`.
///
/// The halving makes the derivative the plain mean residual `(y_pred - y) / m`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss<B: Backend>(&self, y_pred: &B::Vector, y: &B::Vector) -> Result<f64> {
        let m = non_empty::<B>(y_pred)?;
        let diff = B::sub(y_pred, y)?;
        Ok(B::dot(&diff, &diff)? / (2.0 * m))
    }

    fn loss_prime<B: Backend>(&self, y_pred: &B::Vector, y: &B::Vector) -> Result<B::Vector> {
        let m = non_empty::<B>(y_pred)?;
        let diff = B::sub(y_pred, y)?;
        Ok(B::scale(&diff, 1.0 / m))
    }
}

fn non_empty<B: Backend>(y_pred: &B::Vector) -> Result<f64> {
    match B::len(y_pred) {
        0 => Err(ModelErr::EmptyDataset),
        m => Ok(m as f64),
    }
}
