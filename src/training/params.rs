use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};

use crate::{ModelErr, Result, backend::Backend};

/// The key of the weight vector in [`Parameters::to_map`].
pub const WEIGHTS_KEY: &str = "W_0";
/// The key of the bias in [`Parameters::to_map`].
pub const BIAS_KEY: &str = "b";

/// The trainable parameters of a linear regression: a weight per feature and a bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters<B: Backend> {
    w_0: B::Vector,
    b: f64,
}

impl<B: Backend> Parameters<B> {
    pub fn new(w_0: B::Vector, b: f64) -> Self {
        Self { w_0, b }
    }

    /// Returns the weight vector, one weight per feature.
    pub fn w_0(&self) -> &B::Vector {
        &self.w_0
    }

    /// Returns the bias.
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn input_size(&self) -> usize {
        B::len(&self.w_0)
    }

    /// Copies the parameters to host memory, keyed by `"W_0"` and `"b"`.
    pub fn to_map(&self) -> BTreeMap<&'static str, Vec<f64>> {
        BTreeMap::from([(WEIGHTS_KEY, B::to_host(&self.w_0)), (BIAS_KEY, vec![self.b])])
    }
}

/// The gradient of the loss with respect to the [`Parameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients<B: Backend> {
    d_w: B::Vector,
    d_b: f64,
}

impl<B: Backend> Gradients<B> {
    pub fn new(d_w: B::Vector, d_b: f64) -> Self {
        Self { d_w, d_b }
    }

    pub fn d_w(&self) -> &B::Vector {
        &self.d_w
    }

    pub fn d_b(&self) -> f64 {
        self.d_b
    }

    /// Packs the gradients into an `input_size × 2` matrix: column 0 holds the weight gradients
    /// and column 1 the bias gradient (repeated on every row).
    pub fn to_columns(&self) -> Array2<f64> {
        let d_w = B::to_host(&self.d_w);
        Array2::from_shape_fn((d_w.len(), 2), |(i, j)| if j == 0 { d_w[i] } else { self.d_b })
    }

    /// Unpacks gradients from the layout produced by [`Gradients::to_columns`].
    ///
    /// # Errors
    /// `ModelErr::ShapeMismatch` if `columns` doesn't have exactly two columns or has no rows,
    /// `ModelErr::InvalidInput` if the bias column isn't the same value on every row.
    pub fn from_columns(columns: ArrayView2<f64>) -> Result<Self> {
        let (nrows, ncols) = columns.dim();
        if ncols != 2 {
            return Err(ModelErr::ShapeMismatch {
                what: "gradient columns",
                got: ncols,
                expected: 2,
            });
        }

        if nrows == 0 {
            return Err(ModelErr::ShapeMismatch {
                what: "gradient rows",
                got: 0,
                expected: 1,
            });
        }

        let d_b = columns[[0, 1]];
        if columns.column(1).iter().any(|&v| v != d_b) {
            return Err(ModelErr::InvalidInput(format!(
                "the bias gradient column must repeat {d_b} on every row"
            )));
        }

        let d_w: Vec<f64> = columns.column(0).to_vec();
        Ok(Self::new(B::vector(&d_w), d_b))
    }
}

/// The normalised training data, laid out for the linear algebra.
#[derive(Debug, Clone)]
pub struct TrainingData<B: Backend> {
    features: B::Matrix,
    labels: B::Vector,
}

impl<B: Backend> TrainingData<B> {
    /// Creates a new `TrainingData`.
    ///
    /// # Arguments
    /// * `features` - A `samples × features` matrix.
    /// * `labels` - One label per sample.
    pub fn new(features: B::Matrix, labels: B::Vector) -> Result<Self> {
        let (rows, _) = B::shape(&features);
        if B::len(&labels) != rows {
            return Err(ModelErr::ShapeMismatch {
                what: "training labels",
                got: B::len(&labels),
                expected: rows,
            });
        }

        Ok(Self { features, labels })
    }

    pub fn features(&self) -> &B::Matrix {
        &self.features
    }

    pub fn labels(&self) -> &B::Vector {
        &self.labels
    }

    pub fn sample_count(&self) -> usize {
        B::len(&self.labels)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn gradients_pack_weights_then_bias() {
        let grads = Gradients::<CpuBackend>::new(array![1., 2., 3.], -4.);
        let packed = grads.to_columns();

        assert_eq!(packed, array![[1., -4.], [2., -4.], [3., -4.]]);
        assert_eq!(Gradients::<CpuBackend>::from_columns(packed.view()).unwrap(), grads);
    }

    #[test]
    fn gradients_need_two_columns() {
        let res = Gradients::<CpuBackend>::from_columns(array![[1.], [2.]].view());
        assert!(matches!(res, Err(ModelErr::ShapeMismatch { got: 1, expected: 2, .. })));
    }

    #[test]
    fn gradients_need_a_constant_bias_column() {
        let res = Gradients::<CpuBackend>::from_columns(array![[1., 2.], [3., 5.]].view());
        assert!(matches!(res, Err(ModelErr::InvalidInput(_))));
    }

    #[test]
    fn parameter_map_has_both_keys() {
        let params = Parameters::<CpuBackend>::new(array![0., 0.], 2.);
        let map = params.to_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map[WEIGHTS_KEY], vec![0., 0.]);
        assert_eq!(map[BIAS_KEY], vec![2.]);
    }
}
