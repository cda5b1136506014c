/// Attribution engine: per-(instance, feature) contributions to the
/// classifier's margin, relative to a training-set baseline.
pub mod interaction;
pub mod linear;

use ndarray::{ArrayView1, Axis};

use crate::data::model::FeatureMatrix;
use crate::error::{ExplainError, Result};

/// One attribution value per (test instance, output feature).
#[derive(Debug, Clone, PartialEq)]
pub struct Attributions {
    /// Expected model output over the background data.
    pub base_value: f64,
    pub values: FeatureMatrix,
    /// Which model output (coefficient row) these values explain.
    pub output: usize,
}

impl Attributions {
    pub fn n_instances(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// Attribution row for one instance, bounds-checked.
    pub fn instance(&self, index: usize) -> Result<ArrayView1<'_, f64>> {
        if index >= self.n_instances() {
            return Err(ExplainError::SelectionOutOfRange {
                what: "employee",
                index,
                len: self.n_instances(),
            });
        }
        Ok(self.values.row(index))
    }

    /// `base + Σφ` for one instance: the explained model output.
    pub fn output_value(&self, index: usize) -> f64 {
        self.base_value + self.values.row(index).sum()
    }

    /// Mean absolute attribution per feature column.
    pub fn mean_abs(&self) -> Vec<f64> {
        self.values
            .mapv(f64::abs)
            .mean_axis(Axis(0))
            .map_or_else(|| vec![0.0; self.n_features()], |m| m.to_vec())
    }

    /// Largest `|base + Σφ − margin|` over all instances.
    pub fn max_additivity_residual(&self, margins: ArrayView1<'_, f64>) -> f64 {
        margins
            .iter()
            .enumerate()
            .map(|(i, m)| (self.output_value(i) - m).abs())
            .fold(0.0, f64::max)
    }
}
