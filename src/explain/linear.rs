use ndarray::{Array1, Array2, Axis};

use crate::data::model::FeatureMatrix;
use crate::pipeline::classifier::LogisticRegression;

use super::Attributions;

// ---------------------------------------------------------------------------
// Linear attribution explainer
// ---------------------------------------------------------------------------

/// Exact attributions for a linear model with independent features:
/// `φ_ij = w_j · (x_ij − E[x_j])`, baseline `E[f(x)] = w · E[x] + b`,
/// expectations taken over the background (training) matrix.
#[derive(Debug, Clone)]
pub struct LinearExplainer {
    /// `(outputs, features)`
    weights: Array2<f64>,
    means: Array1<f64>,
    expected_values: Array1<f64>,
}

impl LinearExplainer {
    /// An empty background gives zero means; artifact loading rejects an
    /// empty training table before it gets here.
    pub fn new(model: &LogisticRegression, background: &FeatureMatrix) -> Self {
        let weights = model.weights();
        let means = background
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(background.ncols()));
        let expected_values = weights.dot(&means) + &model.intercepts();
        LinearExplainer {
            weights,
            means,
            expected_values,
        }
    }

    /// One attribution set per model output, each covering every row of `x`.
    pub fn shap_values(&self, x: &FeatureMatrix) -> Vec<Attributions> {
        let centred = x - &self.means;
        self.weights
            .rows()
            .into_iter()
            .zip(&self.expected_values)
            .enumerate()
            .map(|(output, (w, &base_value))| Attributions {
                base_value,
                values: &centred * &w,
                output,
            })
            .collect()
    }
}

/// Pick the attribution set to display.
///
/// Two sets (binary model exported with one row per class): take the set at
/// `positive_index`, falling back to index 1 when the positive label is not
/// among the classes. A single set is used as-is.
pub fn select_positive_class(
    mut sets: Vec<Attributions>,
    positive_index: Option<usize>,
) -> Option<Attributions> {
    if sets.len() <= 1 {
        return sets.pop();
    }
    let index = match positive_index {
        Some(i) if i < sets.len() => i,
        _ => 1,
    };
    Some(sets.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression {
            coef: vec![vec![0.5, -2.0, 1.0]],
            intercept: vec![-0.25],
            classes: vec![0, 1],
        }
    }

    fn background() -> FeatureMatrix {
        array![[1.0, 0.0, 2.0], [3.0, 1.0, -2.0], [2.0, 0.5, 0.0]]
    }

    #[test]
    fn baseline_is_mean_model_output_over_background() {
        let lr = model();
        let bg = background();
        let explainer = LinearExplainer::new(&lr, &bg);
        let mean_margin = lr.decision_function(&bg).column(0).sum() / bg.nrows() as f64;
        assert!((explainer.expected_values[0] - mean_margin).abs() < 1e-12);
    }

    #[test]
    fn attributions_sum_to_decision_score() {
        let lr = model();
        let explainer = LinearExplainer::new(&lr, &background());
        let x = array![[10.0, -3.0, 0.5], [0.0, 0.0, 0.0], [-1.5, 2.0, 7.0]];
        let sets = explainer.shap_values(&x);
        assert_eq!(sets.len(), 1);
        let attr = &sets[0];
        let margins = lr.decision_function(&x);
        for i in 0..x.nrows() {
            let total = attr.base_value + attr.values.row(i).sum();
            assert!((total - margins[[i, 0]]).abs() < 1e-9);
        }
    }

    #[test]
    fn instance_at_background_mean_has_zero_attribution() {
        let explainer = LinearExplainer::new(&model(), &background());
        let x = array![[2.0, 0.5, 0.0]];
        let attr = &explainer.shap_values(&x)[0];
        assert!(attr.values.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn two_sets_select_positive_class() {
        let lr = LogisticRegression {
            coef: vec![vec![1.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0]],
            intercept: vec![0.0, 0.0],
            classes: vec![1, 0],
        };
        let explainer = LinearExplainer::new(&lr, &background());
        let x = array![[4.0, 0.0, 0.0]];
        let sets = explainer.shap_values(&x);

        let picked = select_positive_class(sets.clone(), lr.class_index(1)).unwrap();
        assert_eq!(picked.output, 0);
        assert_eq!(picked.values[[0, 0]], 2.0);

        let fallback = select_positive_class(sets, None).unwrap();
        assert_eq!(fallback.output, 1);
    }

    #[test]
    fn single_set_is_used_as_is() {
        let explainer = LinearExplainer::new(&model(), &background());
        let x = array![[0.0, 0.0, 0.0]];
        let picked = select_positive_class(explainer.shap_values(&x), Some(1)).unwrap();
        assert_eq!(picked.output, 0);
    }
}
