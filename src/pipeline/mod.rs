/// Trained model artifact: a fitted preprocessing step followed by a
/// linear classifier.
///
/// ```text
///   FeatureTable ──► ColumnTransformer ──► FeatureMatrix ──► LogisticRegression
///   (raw records)     (scale / one-hot)     (numeric)          (margin, proba)
/// ```
pub mod classifier;
pub mod preprocess;

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::data::model::FeatureTable;
use crate::error::Result;

use classifier::LogisticRegression;
use preprocess::ColumnTransformer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedPipeline {
    pub preprocessor: ColumnTransformer,
    pub classifier: LogisticRegression,
}

impl TrainedPipeline {
    /// Read and structurally validate a pipeline JSON file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path).context("reading pipeline file")?;
        let pipeline: TrainedPipeline =
            serde_json::from_str(&text).context("parsing pipeline JSON")?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.preprocessor.validate().context("invalid preprocessor")?;
        let n_features = self.preprocessor.feature_names_out().len();
        ensure!(n_features > 0, "preprocessor produces no output features");
        self.classifier
            .validate(n_features)
            .context("invalid classifier")
    }

    /// Positive-class probability for every record of `table`.
    pub fn predict_proba(&self, table: &FeatureTable, positive_index: usize) -> Result<Vec<f64>> {
        let x = self.preprocessor.transform(table)?;
        Ok(self.classifier.predict_proba(&x).column(positive_index).to_vec())
    }

    /// Predicted class label for every record of `table`.
    pub fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>> {
        let x = self.preprocessor.transform(table)?;
        Ok(self.classifier.predict(&x))
    }
}
