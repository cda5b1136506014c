use std::fmt;

/// Sign of a feature's push on the attrition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    IncreasesRisk,
    DecreasesRisk,
}

impl Direction {
    /// Strictly positive attributions increase risk; zero counts as decreasing.
    pub fn of(attribution: f64) -> Self {
        if attribution > 0.0 {
            Direction::IncreasesRisk
        } else {
            Direction::DecreasesRisk
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::IncreasesRisk => write!(f, "increases risk"),
            Direction::DecreasesRisk => write!(f, "decreases risk"),
        }
    }
}

/// One feature's contribution to a single prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRow {
    pub feature: String,
    pub attribution: f64,
    pub direction: Direction,
}

/// Feature indices ordered by descending |attribution|; ties keep column order.
pub fn order_by_magnitude(attributions: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..attributions.len()).collect();
    order.sort_by(|&a, &b| attributions[b].abs().total_cmp(&attributions[a].abs()));
    order
}

/// The `k` strongest contributions of one instance.
pub fn top_contributions(feature_names: &[String], attributions: &[f64], k: usize) -> Vec<ContributionRow> {
    order_by_magnitude(attributions)
        .into_iter()
        .take(k)
        .map(|j| ContributionRow {
            feature: feature_names[j].clone(),
            attribution: attributions[j],
            direction: Direction::of(attributions[j]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|j| format!("f{j}")).collect()
    }

    #[test]
    fn sorted_by_absolute_value_with_direction_labels() {
        let phi = [0.1, -0.9, 0.0, 0.5, -0.2, 0.3, 0.05];
        let top = top_contributions(&names(7), &phi, 5);

        let order: Vec<&str> = top.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["f1", "f3", "f5", "f4", "f0"]);
        assert!(top.windows(2).all(|w| w[0].attribution.abs() >= w[1].attribution.abs()));
        for row in &top {
            let expected = if row.attribution > 0.0 {
                "increases risk"
            } else {
                "decreases risk"
            };
            assert_eq!(row.direction.to_string(), expected);
        }
    }

    #[test]
    fn zero_attribution_is_not_an_increase() {
        assert_eq!(Direction::of(0.0), Direction::DecreasesRisk);
        assert_eq!(Direction::of(1e-12), Direction::IncreasesRisk);
    }

    #[test]
    fn fewer_features_than_requested() {
        let top = top_contributions(&names(3), &[1.0, -2.0, 0.5], 5);
        assert_eq!(top.len(), 3);
    }
}
