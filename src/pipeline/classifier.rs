use anyhow::ensure;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::data::model::FeatureMatrix;

// ---------------------------------------------------------------------------
// Fitted logistic regression
// ---------------------------------------------------------------------------

/// Linear classifier over the transformed feature space.
///
/// A single coefficient row is the usual binary model: its margin scores
/// `classes[1]`. With one row per class the margins go through a softmax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    pub classes: Vec<i64>,
}

impl LogisticRegression {
    pub fn validate(&self, n_features: usize) -> anyhow::Result<()> {
        ensure!(!self.coef.is_empty(), "classifier has no coefficients");
        ensure!(
            self.intercept.len() == self.coef.len(),
            "{} coefficient rows but {} intercepts",
            self.coef.len(),
            self.intercept.len()
        );
        let expected_classes = if self.coef.len() == 1 { 2 } else { self.coef.len() };
        ensure!(
            self.classes.len() == expected_classes,
            "{} coefficient rows for {} classes",
            self.coef.len(),
            self.classes.len()
        );
        for (k, row) in self.coef.iter().enumerate() {
            ensure!(
                row.len() == n_features,
                "coefficient row {k} has {} weights, preprocessor yields {n_features} features",
                row.len()
            );
        }
        Ok(())
    }

    /// Coefficients as an `(outputs, features)` matrix.
    pub fn weights(&self) -> Array2<f64> {
        let n_features = self.coef.first().map_or(0, Vec::len);
        Array2::from_shape_fn((self.coef.len(), n_features), |(k, j)| self.coef[k][j])
    }

    pub fn intercepts(&self) -> Array1<f64> {
        Array1::from(self.intercept.clone())
    }

    /// Raw margins `x·wᵀ + b`, one row per record and one column per output.
    pub fn decision_function(&self, x: &FeatureMatrix) -> Array2<f64> {
        x.dot(&self.weights().t()) + &self.intercepts()
    }

    /// Class probabilities, columns in the order of `classes`.
    pub fn predict_proba(&self, x: &FeatureMatrix) -> Array2<f64> {
        let mut margins = self.decision_function(x);
        if margins.ncols() == 1 {
            return Array2::from_shape_fn((margins.nrows(), 2), |(i, c)| {
                let p = sigmoid(margins[[i, 0]]);
                if c == 1 {
                    p
                } else {
                    1.0 - p
                }
            });
        }
        for mut row in margins.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            row.mapv_inplace(|m| (m - max).exp());
            let total = row.sum();
            row /= total;
        }
        margins
    }

    /// Most probable class per record.
    pub fn predict(&self, x: &FeatureMatrix) -> Vec<i64> {
        self.predict_proba(x)
            .rows()
            .into_iter()
            .map(|proba| {
                let best = proba
                    .iter()
                    .enumerate()
                    .fold(0, |best, (k, p)| if *p > proba[best] { k } else { best });
                self.classes[best]
            })
            .collect()
    }

    /// Position of `label` in `classes`.
    pub fn class_index(&self, label: i64) -> Option<usize> {
        self.classes.iter().position(|&c| c == label)
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
