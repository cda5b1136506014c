use std::path::{Path, PathBuf};

use crate::config::{
    PIPELINE_FILE, TABLE_EXTENSIONS, TEST_FEATURES_STEM, TEST_LABELS_STEM, TRAIN_FEATURES_STEM,
};
use crate::error::{ExplainError, Result};
use crate::pipeline::TrainedPipeline;

use super::loader::{load_labels, load_table};
use super::model::FeatureTable;

/// Everything persisted by the training run.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub pipeline: TrainedPipeline,
    pub x_test: FeatureTable,
    pub x_train: FeatureTable,
    pub y_test: Vec<i64>,
}

/// Find `<stem>.<ext>` for the first supported extension present in `dir`.
pub fn locate_table(dir: &Path, stem: &str) -> Result<PathBuf> {
    TABLE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| ExplainError::ArtifactMissing {
            path: dir.join(format!("{stem}.{{{}}}", TABLE_EXTENSIONS.join(","))),
        })
}

/// Load the pipeline and the three cached tables from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<Artifacts> {
    let pipeline_path = dir.join(PIPELINE_FILE);
    if !pipeline_path.is_file() {
        return Err(ExplainError::ArtifactMissing {
            path: pipeline_path,
        });
    }
    let pipeline = TrainedPipeline::from_json_file(&pipeline_path)
        .map_err(|e| ExplainError::corrupt(&pipeline_path, &e))?;

    let x_test = read_table(dir, TEST_FEATURES_STEM)?;
    let x_train = read_table(dir, TRAIN_FEATURES_STEM)?;

    let labels_path = locate_table(dir, TEST_LABELS_STEM)?;
    let y_test = load_labels(&labels_path).map_err(|e| ExplainError::corrupt(&labels_path, &e))?;

    if x_test.is_empty() {
        return Err(ExplainError::ArtifactCorrupt {
            path: dir.join(TEST_FEATURES_STEM),
            reason: "test set contains no records".into(),
        });
    }
    if x_train.is_empty() {
        return Err(ExplainError::ArtifactCorrupt {
            path: dir.join(TRAIN_FEATURES_STEM),
            reason: "training table contains no records".into(),
        });
    }
    if y_test.len() != x_test.len() {
        return Err(ExplainError::ArtifactCorrupt {
            path: labels_path,
            reason: format!(
                "{} labels for {} test records",
                y_test.len(),
                x_test.len()
            ),
        });
    }

    log::info!(
        "Loaded artifacts from {}: {} test / {} train records, {} raw columns",
        dir.display(),
        x_test.len(),
        x_train.len(),
        x_test.column_names.len()
    );

    Ok(Artifacts {
        pipeline,
        x_test,
        x_train,
        y_test,
    })
}

fn read_table(dir: &Path, stem: &str) -> Result<FeatureTable> {
    let path = locate_table(dir, stem)?;
    load_table(&path).map_err(|e| ExplainError::corrupt(&path, &e))
}
