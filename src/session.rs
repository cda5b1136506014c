use std::path::{Path, PathBuf};

use crate::config::POSITIVE_LABEL;
use crate::data::artifacts::{load_artifacts, Artifacts};
use crate::data::model::{FeatureMatrix, FeatureTable};
use crate::error::{ExplainError, Result};
use crate::explain::linear::{select_positive_class, LinearExplainer};
use crate::explain::Attributions;
use crate::pipeline::TrainedPipeline;
use crate::report::importance::{rank_features, ImportanceRow};

// ---------------------------------------------------------------------------
// Session context
// ---------------------------------------------------------------------------

/// Immutable results of load → transform → explain, computed once when a
/// session opens and borrowed by every panel afterwards.
pub struct Session {
    pub source: PathBuf,
    pub pipeline: TrainedPipeline,
    pub x_test: FeatureTable,
    pub y_test: Vec<i64>,
    pub x_test_transformed: FeatureMatrix,
    pub feature_names: Vec<String>,
    pub attributions: Attributions,
    /// Feature importance ranking, most important first.
    pub ranking: Vec<ImportanceRow>,
    /// Position of the positive label in the classifier's class list.
    pub positive_index: usize,
}

impl Session {
    /// Load the artifact folder and run the attribution engine once.
    pub fn open(dir: &Path) -> Result<Self> {
        let artifacts = load_artifacts(dir)?;
        Self::from_artifacts(dir, artifacts)
    }

    pub fn from_artifacts(dir: &Path, artifacts: Artifacts) -> Result<Self> {
        let Artifacts {
            pipeline,
            x_test,
            x_train,
            y_test,
        } = artifacts;

        let feature_names = pipeline.preprocessor.feature_names_out();
        let x_train_transformed = pipeline.preprocessor.transform(&x_train)?;
        let x_test_transformed = pipeline.preprocessor.transform(&x_test)?;

        let classifier = &pipeline.classifier;
        let positive = classifier.class_index(POSITIVE_LABEL);
        let positive_index = positive.unwrap_or_else(|| {
            log::warn!(
                "label {POSITIVE_LABEL} not in classes {:?}, treating index 1 as positive",
                classifier.classes
            );
            1
        });

        let explainer = LinearExplainer::new(classifier, &x_train_transformed);
        let attributions = select_positive_class(explainer.shap_values(&x_test_transformed), positive)
            .ok_or_else(|| ExplainError::ArtifactCorrupt {
                path: dir.to_path_buf(),
                reason: "classifier produced no attribution set".into(),
            })?;

        let margins = classifier.decision_function(&x_test_transformed);
        log::debug!(
            "additivity residual max |base + sum(phi) - margin| = {:.3e}",
            attributions.max_additivity_residual(margins.column(attributions.output))
        );

        let ranking = rank_features(&feature_names, &attributions);

        log::info!(
            "Explained {} employees over {} output features (base value {:.4})",
            attributions.n_instances(),
            feature_names.len(),
            attributions.base_value
        );

        Ok(Session {
            source: dir.to_path_buf(),
            pipeline,
            x_test,
            y_test,
            x_test_transformed,
            feature_names,
            attributions,
            ranking,
            positive_index,
        })
    }

    /// Number of employees in the test set.
    pub fn n_employees(&self) -> usize {
        self.x_test.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn attributions_add_up_to_every_decision_score() {
        let s = fixtures::session(50, 10, 4);
        assert_eq!(s.feature_names.len(), 30);
        assert_eq!(s.attributions.n_instances(), 50);
        assert_eq!(s.attributions.n_features(), 30);

        let margins = s.pipeline.classifier.decision_function(&s.x_test_transformed);
        for (i, margin) in margins.column(0).iter().enumerate() {
            assert!((s.attributions.output_value(i) - margin).abs() < 1e-6);
        }
    }

    #[test]
    fn opens_a_folder_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_folder(dir.path(), &fixtures::attrition(12, 2, 2));
        let s = Session::open(dir.path()).unwrap();
        assert_eq!(s.n_employees(), 12);
        assert_eq!(s.positive_index, 1);
        assert_eq!(s.source, dir.path());
    }

    #[test]
    fn unseen_category_in_test_set_is_fatal() {
        let fx = fixtures::attrition(8, 1, 1);
        let mut x_test = fx.x_test.clone();
        x_test.rows[3][1] = crate::data::model::RawValue::String("Unknown".into());
        let artifacts = Artifacts {
            pipeline: fx.pipeline,
            x_test,
            x_train: fx.x_train,
            y_test: fx.y_test,
        };
        let err = Session::from_artifacts(Path::new("."), artifacts).err().unwrap();
        assert!(matches!(err, ExplainError::TransformMismatch { .. }));
    }
}
