use super::Optimizer;
use crate::{
    Result,
    backend::Backend,
    training::{Gradients, Parameters},
};

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters the step starts from.
    /// * `grad` - The gradient used for taking the step.
    fn update_params<B: Backend>(
        &mut self,
        params: &Parameters<B>,
        grad: &Gradients<B>,
    ) -> Result<Parameters<B>> {
        let lr = self.learning_rate;
        let w_0 = B::scaled_sub(params.w_0(), lr, grad.d_w())?;
        let b = params.b() - lr * grad.d_b();
        Ok(Parameters::new(w_0, b))
    }
}
