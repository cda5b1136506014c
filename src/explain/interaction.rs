use ndarray::{Array2, ArrayView1, Axis};

use crate::config::INTERACTION_MAX_BIN;
use crate::data::model::FeatureMatrix;

/// Rank candidate interaction partners for feature `index`.
///
/// Instances are sorted by the feature's value and cut into bins of
/// `max(min(n / 10, 50), 1)`. A candidate scores the sum over bins of
/// `|corr(φ_index, x_candidate)|`, counting only bins where both sides vary.
/// The feature itself and all-zero columns are left out. Ties keep column
/// order.
pub fn approximate_interactions(
    index: usize,
    attributions: &FeatureMatrix,
    x: &FeatureMatrix,
) -> Vec<usize> {
    let n = x.nrows();
    let feature = x.column(index);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| feature[a].total_cmp(&feature[b]));

    let reference = attributions.column(index).select(Axis(0), &order);
    let bin = (n / 10).min(INTERACTION_MAX_BIN).max(1);

    let mut scored: Vec<(usize, f64)> = (0..x.ncols())
        .filter(|&j| j != index)
        .filter(|&j| x.column(j).mapv(f64::abs).sum() >= 1e-8)
        .map(|j| {
            let other = x.column(j).select(Axis(0), &order);
            let score = reference
                .axis_chunks_iter(Axis(0), bin)
                .zip(other.axis_chunks_iter(Axis(0), bin))
                .filter(|(r, o)| r.std(0.0) > 0.0 && o.std(0.0) > 0.0)
                .map(|(r, o)| pearson(r, o).abs())
                .sum::<f64>();
            (j, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(j, _)| j).collect()
}

/// Best interaction partner, if any other non-constant-zero feature exists.
pub fn pick_interaction(index: usize, attributions: &FeatureMatrix, x: &FeatureMatrix) -> Option<usize> {
    approximate_interactions(index, attributions, x).into_iter().next()
}

fn pearson(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let ca = &a - a.mean().unwrap_or(0.0);
    let cb = &b - b.mean().unwrap_or(0.0);
    ca.dot(&cb) / (ca.dot(&ca) * cb.dot(&cb)).sqrt()
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    /// 40 rows, 4 features: φ of feature 0 tracks feature 2 exactly,
    /// feature 1 wobbles independently, feature 3 is all zeros.
    fn fixture() -> (FeatureMatrix, FeatureMatrix) {
        let f2 = |i: usize| ((i * 7) % 11) as f64;
        let x = Array2::from_shape_fn((40, 4), |(i, j)| match j {
            0 => i as f64,
            1 if (i / 4) % 2 == 0 => 1.0,
            1 => -1.0,
            2 => f2(i),
            _ => 0.0,
        });
        let phi = Array2::from_shape_fn((40, 4), |(i, j)| if j == 0 { 0.3 * f2(i) + 1.0 } else { 0.0 });
        (phi, x)
    }

    #[test]
    fn strongest_co_variation_wins() {
        let (phi, x) = fixture();
        assert_eq!(pick_interaction(0, &phi, &x), Some(2));
    }

    #[test]
    fn excludes_self_and_zero_columns() {
        let (phi, x) = fixture();
        let ranking = approximate_interactions(0, &phi, &x);
        assert_eq!(ranking, vec![2, 1]);
    }

    #[test]
    fn single_feature_has_no_partner() {
        let x = array![[1.0], [2.0]];
        assert_eq!(pick_interaction(0, &x, &x), None);
    }

    #[test]
    fn pearson_of_linear_relation_is_one() {
        let a = array![1.0, 2.0, 3.0];
        assert!((pearson(a.view(), array![2.0, 4.0, 6.0].view()) - 1.0).abs() < 1e-12);
        assert!((pearson(a.view(), array![3.0, 2.0, 1.0].view()) + 1.0).abs() < 1e-12);
    }
}
