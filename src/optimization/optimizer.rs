use crate::{
    Result,
    backend::Backend,
    training::{Gradients, Parameters},
};

pub trait Optimizer {
    /// Computes the parameters that result from taking one step along `grad`.
    ///
    /// The current parameters are left untouched, the caller decides when to swap them.
    fn update_params<B: Backend>(
        &mut self,
        params: &Parameters<B>,
        grad: &Gradients<B>,
    ) -> Result<Parameters<B>>;
}
