use crate::explain::Attributions;

/// One line of the global importance table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceRow {
    /// Column of the feature in the transformed matrix.
    pub feature_index: usize,
    pub feature: String,
    /// Mean |attribution| over all instances.
    pub importance: f64,
}

/// Mean |attribution| per feature, descending. The sort is stable, so ties
/// keep the original column order.
pub fn rank_features(feature_names: &[String], attributions: &Attributions) -> Vec<ImportanceRow> {
    let mut rows: Vec<ImportanceRow> = attributions
        .mean_abs()
        .into_iter()
        .zip(feature_names)
        .enumerate()
        .map(|(feature_index, (importance, name))| ImportanceRow {
            feature_index,
            feature: name.clone(),
            importance,
        })
        .collect();
    rows.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    rows
}

/// The first `n` rows of a ranking, for bar charts.
pub fn top_n(ranking: &[ImportanceRow], n: usize) -> &[ImportanceRow] {
    &ranking[..n.min(ranking.len())]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use ndarray::{array, Array2};

    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|j| format!("f{j}")).collect()
    }

    #[test]
    fn ranks_by_mean_absolute_value_with_stable_ties() {
        let attr = Attributions {
            base_value: 0.0,
            values: array![[1.0, -3.0, 0.5, -1.0], [-1.0, 1.0, 0.5, 1.0]],
            output: 0,
        };
        let ranking = rank_features(&names(4), &attr);
        let order: Vec<&str> = ranking.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["f1", "f0", "f3", "f2"]);
        assert_eq!(ranking[0].importance, 2.0);
        assert_eq!(ranking[0].feature_index, 1);
    }

    #[test]
    fn display_count_only_truncates() {
        let attr = Attributions {
            base_value: 0.0,
            values: Array2::from_shape_fn((1, 12), |(_, j)| {
                j as f64 * if j % 2 == 0 { 1.0 } else { -1.0 }
            }),
            output: 0,
        };
        let ranking = rank_features(&names(12), &attr);
        let before = ranking.clone();
        for n in [5, 10, 20] {
            let shown = top_n(&ranking, n);
            assert_eq!(shown.len(), n.min(12));
            assert_eq!(shown, &before[..shown.len()]);
        }
        assert_eq!(ranking, before);
    }
}
