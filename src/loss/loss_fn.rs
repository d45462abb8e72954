use crate::{Result, backend::Backend};

pub trait LossFn {
    /// Computes the loss of the predictions `y_pred` against the targets `y`.
    fn loss<B: Backend>(&self, y_pred: &B::Vector, y: &B::Vector) -> Result<f64>;

    /// Computes the derivative of the loss with respect to each prediction.
    fn loss_prime<B: Backend>(&self, y_pred: &B::Vector, y: &B::Vector) -> Result<B::Vector>;
}
