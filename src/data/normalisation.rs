use serde::Deserialize;

use crate::{ModelErr, Result};

/// How a column is rescaled before training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalisationMethod {
    /// `(v - mean) / std`, with the population standard deviation.
    #[default]
    ZScore,
    /// `(v - min) / (max - min)`, into `[0, 1]`.
    MinMax,
}

/// The statistics of a single column, enough to normalise it (or any other column with the same
/// meaning) as `(v - offset) / scale`.
///
/// A column without spread has no scale and every value normalises to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    method: NormalisationMethod,
    offset: f64,
    scale: Option<f64>,
}

impl ColumnStats {
    /// Computes the statistics of a column.
    ///
    /// # Arguments
    /// * `method` - The normalisation method.
    /// * `values` - The column's values.
    ///
    /// # Returns
    /// The column's statistics, `ModelErr::EmptyDataset` if `values` is empty or
    /// `ModelErr::InvalidInput` if a value is NaN or infinite.
    pub fn fit(method: NormalisationMethod, values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ModelErr::EmptyDataset);
        }

        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(ModelErr::InvalidInput(format!(
                "cannot normalise a column holding {v}"
            )));
        }

        let (offset, spread) = match method {
            NormalisationMethod::ZScore => {
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                (mean, var.sqrt())
            }
            NormalisationMethod::MinMax => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (min, max - min)
            }
        };

        if !spread.is_finite() {
            return Err(ModelErr::InvalidInput(format!(
                "the column's spread overflows: {spread}"
            )));
        }

        // spread below the rounding error of the offset is a constant column
        let scale = (spread > f64::EPSILON * offset.abs()).then_some(spread);
        Ok(Self {
            method,
            offset,
            scale,
        })
    }

    pub fn method(&self) -> NormalisationMethod {
        self.method
    }

    /// The mean for z-score, the minimum for min-max.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The standard deviation for z-score, the range for min-max. `None` for constant columns.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Normalises `values` with these statistics.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        match self.scale {
            Some(scale) => values.iter().map(|v| (v - self.offset) / scale).collect(),
            None => vec![0.0; values.len()],
        }
    }

    /// Maps normalised values back to the column's units, the inverse of [`ColumnStats::apply`].
    ///
    /// Every value of a constant column maps back to that constant.
    pub fn invert(&self, values: &[f64]) -> Vec<f64> {
        match self.scale {
            Some(scale) => values.iter().map(|v| v * scale + self.offset).collect(),
            None => vec![self.offset; values.len()],
        }
    }
}
