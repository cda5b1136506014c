use crate::data::model::FeatureMatrix;
use crate::explain::Attributions;

use super::importance::ImportanceRow;

/// Resolution used to group near-equal attributions before dodging.
const DODGE_BINS: f64 = 100.0;

/// One dot of the beeswarm.
#[derive(Debug, Clone, PartialEq)]
pub struct BeeswarmPoint {
    pub attribution: f64,
    /// Vertical offset from the row's centre line, within ±0.45.
    pub offset: f64,
    /// Feature value scaled to [0, 1] between its 5th and 95th percentile.
    pub color: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeeswarmRow {
    pub feature: String,
    pub points: Vec<BeeswarmPoint>,
}

/// Beeswarm rows for the `n` most important features, most important first.
pub fn build_beeswarm(
    ranking: &[ImportanceRow],
    attributions: &Attributions,
    x: &FeatureMatrix,
    n: usize,
) -> Vec<BeeswarmRow> {
    ranking
        .iter()
        .take(n)
        .map(|row| {
            let phi = attributions.values.column(row.feature_index).to_vec();
            let values = x.column(row.feature_index).to_vec();
            let offsets = dodge(&phi);
            let colors = normalize_colors(&values);
            BeeswarmRow {
                feature: row.feature.clone(),
                points: phi
                    .into_iter()
                    .zip(offsets)
                    .zip(colors)
                    .map(|((attribution, offset), color)| BeeswarmPoint {
                        attribution,
                        offset,
                        color,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Deterministic vertical spread: points falling in the same attribution bin
/// alternate above and below the centre line, one layer further out each.
fn dodge(phi: &[f64]) -> Vec<f64> {
    let n = phi.len();
    if n == 0 {
        return Vec::new();
    }
    let min = phi.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = phi.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let quant: Vec<i64> = phi
        .iter()
        .map(|v| (DODGE_BINS * (v - min) / (max - min + 1e-8)).round() as i64)
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| quant[i]);

    let mut ys = vec![0.0; n];
    let mut layer = 0usize;
    let mut last_bin = None;
    for &i in &order {
        if last_bin != Some(quant[i]) {
            layer = 0;
            last_bin = Some(quant[i]);
        }
        let magnitude = layer.div_ceil(2) as f64;
        ys[i] = if layer % 2 == 0 { -magnitude } else { magnitude };
        layer += 1;
    }

    let widest = ys.iter().map(|y: &f64| y.abs()).fold(0.0, f64::max);
    let scale = 0.45 / (widest + 1.0);
    ys.iter().map(|y| y * scale).collect()
}

/// Percentile-clipped min-max scaling for the colour axis.
pub fn normalize_colors(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let (mut lo, mut hi) = (percentile(&sorted, 5.0), percentile(&sorted, 95.0));
    if lo == hi {
        lo = sorted.first().copied().unwrap_or(0.0);
        hi = sorted.last().copied().unwrap_or(0.0);
    }
    if lo == hi {
        return vec![0.5; values.len()];
    }
    values
        .iter()
        .map(|v| ((v - lo) / (hi - lo)).clamp(0.0, 1.0))
        .collect()
}

/// Linear-interpolated percentile of pre-sorted data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::fixtures;
    use crate::report::importance::rank_features;

    #[test]
    fn rows_follow_importance_and_truncate() {
        let attr = Attributions {
            base_value: 0.0,
            values: array![[0.1, -2.0, 0.5], [0.2, 1.0, -0.5]],
            output: 0,
        };
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let names: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let ranking = rank_features(&names, &attr);

        let rows = build_beeswarm(&ranking, &attr, &x, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].feature, "b");
        assert_eq!(rows[1].feature, "c");
        assert_eq!(rows[0].points.len(), 2);
        assert_eq!(rows[0].points[0].attribution, -2.0);
    }

    #[test]
    fn repeated_calls_give_identical_rows() {
        let s = fixtures::session(30, 4, 2);
        let first = build_beeswarm(&s.ranking, &s.attributions, &s.x_test_transformed, 10);
        let second = build_beeswarm(&s.ranking, &s.attributions, &s.x_test_transformed, 10);
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn identical_values_spread_symmetrically() {
        let offsets = dodge(&[1.0, 1.0, 1.0, 5.0]);
        assert_eq!(offsets[0], 0.0);
        assert!(offsets[1] > 0.0);
        assert!(offsets[2] < 0.0);
        assert_eq!(offsets[3], 0.0);
        assert!(offsets.iter().all(|y| y.abs() <= 0.45));
    }

    #[test]
    fn colors_are_clipped_to_unit_range() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let colors = normalize_colors(&values);
        assert_eq!(colors[0], 0.0);
        assert_eq!(colors[100], 1.0);
        assert!((colors[50] - 0.5).abs() < 1e-12);

        assert_eq!(normalize_colors(&[3.0, 3.0]), vec![0.5, 0.5]);
    }
}
