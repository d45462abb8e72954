mod cpu;

use std::fmt::Debug;

use crate::Result;

pub use cpu::CpuBackend;

/// The numeric operations the training code needs from an array runtime.
///
/// Every operation is static: a backend is a type-level choice, not a value. Vectors and matrices
/// are assumed to live wherever the backend keeps them (host or device memory); `to_host` is the
/// only point where values are copied back.
///
/// Binary operations validate their operands' shapes and fail with `ModelErr::ShapeMismatch`
/// instead of panicking.
pub trait Backend: Debug + Clone + Default {
    type Vector: Clone + Debug + PartialEq;
    type Matrix: Clone + Debug + PartialEq;

    /// Creates a vector holding `values`.
    fn vector(values: &[f64]) -> Self::Vector;

    /// Creates a vector of length `len` where every element is `value`.
    fn full(len: usize, value: f64) -> Self::Vector;

    /// Creates a `values.len() × 1` column vector.
    fn column_vector(values: &[f64]) -> Self::Matrix;

    /// Joins column vectors side by side into an `n × k` matrix.
    ///
    /// # Arguments
    /// * `columns` - The `n × 1` columns, in order.
    ///
    /// # Returns
    /// The joined matrix or an error if the columns don't share the row count or there are none.
    fn hstack(columns: &[&Self::Matrix]) -> Result<Self::Matrix>;

    /// Reads a matrix's elements in row-major order into a vector.
    fn flatten(m: &Self::Matrix) -> Self::Vector;

    fn len(v: &Self::Vector) -> usize;

    /// Returns `(rows, columns)`.
    fn shape(m: &Self::Matrix) -> (usize, usize);

    /// Elementwise `a - b`.
    fn sub(a: &Self::Vector, b: &Self::Vector) -> Result<Self::Vector>;

    /// Elementwise `a - alpha * b`.
    fn scaled_sub(a: &Self::Vector, alpha: f64, b: &Self::Vector) -> Result<Self::Vector>;

    /// Elementwise `v * alpha`.
    fn scale(v: &Self::Vector, alpha: f64) -> Self::Vector;

    /// Elementwise `v + s`.
    fn add_scalar(v: &Self::Vector, s: f64) -> Self::Vector;

    /// Matrix-vector product `m · v`.
    fn mat_vec(m: &Self::Matrix, v: &Self::Vector) -> Result<Self::Vector>;

    /// Transposed matrix-vector product `mᵀ · v`.
    fn t_mat_vec(m: &Self::Matrix, v: &Self::Vector) -> Result<Self::Vector>;

    fn sum(v: &Self::Vector) -> f64;

    fn dot(a: &Self::Vector, b: &Self::Vector) -> Result<f64>;

    /// Copies a vector's values back to host memory.
    fn to_host(v: &Self::Vector) -> Vec<f64>;
}
