use ndarray::{Array1, Array2, ArrayView2, Axis};

use super::Backend;
use crate::{ModelErr, Result};

/// An ndarray backed implementation of [`Backend`] that keeps everything in host memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuBackend;

fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(ModelErr::ShapeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

impl Backend for CpuBackend {
    type Vector = Array1<f64>;
    type Matrix = Array2<f64>;

    fn vector(values: &[f64]) -> Array1<f64> {
        Array1::from_vec(values.to_vec())
    }

    fn full(len: usize, value: f64) -> Array1<f64> {
        Array1::from_elem(len, value)
    }

    fn column_vector(values: &[f64]) -> Array2<f64> {
        Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i])
    }

    fn hstack(columns: &[&Array2<f64>]) -> Result<Array2<f64>> {
        let Some(first) = columns.first() else {
            return Err(ModelErr::ShapeMismatch {
                what: "stacked columns",
                got: 0,
                expected: 1,
            });
        };

        let nrows = first.nrows();
        for column in columns {
            check_len("stacked column rows", column.nrows(), nrows)?;
        }

        let views: Vec<ArrayView2<f64>> = columns.iter().map(|c| c.view()).collect();
        ndarray::concatenate(Axis(1), &views).map_err(|_| ModelErr::ShapeMismatch {
            what: "stacked columns",
            got: columns.len(),
            expected: columns.len(),
        })
    }

    fn flatten(m: &Array2<f64>) -> Array1<f64> {
        m.iter().copied().collect()
    }

    fn len(v: &Array1<f64>) -> usize {
        v.len()
    }

    fn shape(m: &Array2<f64>) -> (usize, usize) {
        m.dim()
    }

    fn sub(a: &Array1<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("vector subtraction", b.len(), a.len())?;
        Ok(a - b)
    }

    fn scaled_sub(a: &Array1<f64>, alpha: f64, b: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("scaled subtraction", b.len(), a.len())?;
        let mut out = a.clone();
        out.scaled_add(-alpha, b);
        Ok(out)
    }

    fn scale(v: &Array1<f64>, alpha: f64) -> Array1<f64> {
        v * alpha
    }

    fn add_scalar(v: &Array1<f64>, s: f64) -> Array1<f64> {
        v.mapv(|x| x + s)
    }

    fn mat_vec(m: &Array2<f64>, v: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("matrix-vector product", v.len(), m.ncols())?;
        Ok(m.dot(v))
    }

    fn t_mat_vec(m: &Array2<f64>, v: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("transposed matrix-vector product", v.len(), m.nrows())?;
        Ok(m.t().dot(v))
    }

    fn sum(v: &Array1<f64>) -> f64 {
        v.sum()
    }

    fn dot(a: &Array1<f64>, b: &Array1<f64>) -> Result<f64> {
        check_len("dot product", b.len(), a.len())?;
        Ok(a.dot(b))
    }

    fn to_host(v: &Array1<f64>) -> Vec<f64> {
        v.to_vec()
    }
}
