use crate::config::{POSITIVE_LABEL, TOP_CONTRIBUTIONS};
use crate::error::Result;
use crate::session::Session;

use super::contributions::{top_contributions, ContributionRow};
use super::force::{build_force, ForceLayout};
use super::risk::RiskLevel;
use super::waterfall::{build_waterfall, Waterfall};

/// Everything the "Individual prediction" tab shows for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualReport {
    pub index: usize,
    pub predicted_class: i64,
    /// Probability of the positive (attrition) class.
    pub probability: f64,
    pub risk: RiskLevel,
    pub actual_class: Option<i64>,
    /// Raw column name → raw value, in table order.
    pub raw_values: Vec<(String, String)>,
    pub waterfall: Waterfall,
    pub force: ForceLayout,
    pub top: Vec<ContributionRow>,
}

impl IndividualReport {
    pub fn predicted_label(&self) -> &'static str {
        class_label(self.predicted_class)
    }
}

pub fn class_label(class: i64) -> &'static str {
    if class == POSITIVE_LABEL {
        "Attrition"
    } else {
        "Retention"
    }
}

/// Build the per-employee report. Prediction goes through the full pipeline
/// on the raw record, so preprocessing failures surface here.
pub fn build_individual(session: &Session, index: usize, max_display: usize) -> Result<IndividualReport> {
    let attributions = session.attributions.instance(index)?.to_vec();
    let record = session.x_test.select_rows(&[index]);

    let predicted_class = session.pipeline.predict(&record)?[0];
    let probability = session.pipeline.predict_proba(&record, session.positive_index)?[0];

    let raw_values = session
        .x_test
        .column_names
        .iter()
        .enumerate()
        .map(|(c, name)| (name.clone(), session.x_test.value(index, c).to_string()))
        .collect();

    let base_value = session.attributions.base_value;
    let names = &session.feature_names;
    Ok(IndividualReport {
        index,
        predicted_class,
        probability,
        risk: RiskLevel::from_probability(probability),
        actual_class: session.y_test.get(index).copied(),
        raw_values,
        waterfall: build_waterfall(
            names,
            &session.x_test_transformed.row(index).to_vec(),
            &attributions,
            base_value,
            max_display,
        ),
        force: build_force(names, &attributions, base_value),
        top: top_contributions(names, &attributions, TOP_CONTRIBUTIONS),
    })
}
