use crate::data::model::FeatureMatrix;
use crate::error::{ExplainError, Result};
use crate::explain::interaction::pick_interaction;
use crate::explain::Attributions;

use super::summary::normalize_colors;

#[derive(Debug, Clone, PartialEq)]
pub struct DependencePoint {
    /// Transformed feature value (x axis).
    pub value: f64,
    /// Attribution of the same feature (y axis).
    pub attribution: f64,
    /// Scaled value of the interaction feature, when there is one.
    pub color: Option<f64>,
}

/// Scatter of one feature's values against its attributions.
#[derive(Debug, Clone, PartialEq)]
pub struct DependenceReport {
    pub feature: String,
    pub interaction: Option<String>,
    pub points: Vec<DependencePoint>,
}

pub fn build_dependence(
    feature_names: &[String],
    attributions: &Attributions,
    x: &FeatureMatrix,
    feature_index: usize,
) -> Result<DependenceReport> {
    if feature_index >= feature_names.len() {
        return Err(ExplainError::SelectionOutOfRange {
            what: "feature",
            index: feature_index,
            len: feature_names.len(),
        });
    }

    let interaction = pick_interaction(feature_index, &attributions.values, x);
    let colors: Vec<Option<f64>> = match interaction {
        Some(k) => normalize_colors(&x.column(k).to_vec()).into_iter().map(Some).collect(),
        None => vec![None; x.nrows()],
    };

    let points = x
        .column(feature_index)
        .iter()
        .zip(attributions.values.column(feature_index))
        .zip(colors)
        .map(|((&value, &attribution), color)| DependencePoint {
            value,
            attribution,
            color,
        })
        .collect();

    Ok(DependenceReport {
        feature: feature_names[feature_index].clone(),
        interaction: interaction.map(|k| feature_names[k].clone()),
        points,
    })
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn scatter() -> (Vec<String>, Attributions, FeatureMatrix) {
        let x = array![[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, 1.0]];
        let attr = Attributions {
            base_value: 0.0,
            values: array![[-1.0, 0.0], [0.0, 0.0], [1.0, 0.0], [2.0, 0.0]],
            output: 0,
        };
        (vec!["num__Age".into(), "cat__OverTime_Yes".into()], attr, x)
    }

    #[test]
    fn scatter_pairs_values_with_attributions() {
        let (names, attr, x) = scatter();

        let report = build_dependence(&names, &attr, &x, 0).unwrap();
        assert_eq!(report.feature, "num__Age");
        assert_eq!(report.interaction.as_deref(), Some("cat__OverTime_Yes"));
        assert_eq!(report.points.len(), 4);
        assert_eq!(report.points[3].value, 4.0);
        assert_eq!(report.points[3].attribution, 2.0);
        assert_eq!(report.points[1].color, Some(1.0));
    }

    #[test]
    fn repeated_calls_give_identical_reports() {
        let (names, attr, x) = scatter();
        for feature in 0..names.len() {
            assert_eq!(
                build_dependence(&names, &attr, &x, feature).unwrap(),
                build_dependence(&names, &attr, &x, feature).unwrap()
            );
        }
    }

    #[test]
    fn unknown_feature_is_out_of_range() {
        let x = array![[1.0]];
        let attr = Attributions {
            base_value: 0.0,
            values: x.clone(),
            output: 0,
        };
        let err = build_dependence(&["a".to_string()], &attr, &x, 3).unwrap_err();
        assert!(matches!(err, ExplainError::SelectionOutOfRange { what: "feature", .. }));
    }
}
