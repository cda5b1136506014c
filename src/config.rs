use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Artifact layout
// ---------------------------------------------------------------------------

/// Trained pipeline (preprocessor + logistic regression), serde JSON.
pub const PIPELINE_FILE: &str = "log_reg_pipeline.json";

/// Table stems; the first existing `<stem>.<ext>` in [`TABLE_EXTENSIONS`] wins.
pub const TEST_FEATURES_STEM: &str = "X_test";
pub const TRAIN_FEATURES_STEM: &str = "X_train";
pub const TEST_LABELS_STEM: &str = "y_test";

pub const TABLE_EXTENSIONS: [&str; 3] = ["parquet", "csv", "json"];

// ---------------------------------------------------------------------------
// Model conventions
// ---------------------------------------------------------------------------

/// Label value treated as "attrition".
pub const POSITIVE_LABEL: i64 = 1;

pub const HIGH_RISK_ABOVE: f64 = 0.7;
pub const MEDIUM_RISK_ABOVE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Display controls
// ---------------------------------------------------------------------------

pub const FEATURE_COUNT_RANGE: RangeInclusive<usize> = 5..=20;
pub const DEFAULT_FEATURE_COUNT: usize = 10;

/// Rows in the per-employee "top factors" table.
pub const TOP_CONTRIBUTIONS: usize = 5;

/// Upper bound on the bin size used by the interaction heuristic.
pub const INTERACTION_MAX_BIN: usize = 50;
