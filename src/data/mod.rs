/// Data layer: core types and artifact loading.
///
/// Architecture:
/// ```text
///  log_reg_pipeline.json   X_test / X_train / y_test  (.parquet / .csv / .json)
///           │                         │
///           ▼                         ▼
///   ┌───────────────┐          ┌──────────┐
///   │TrainedPipeline│          │  loader   │  parse file → FeatureTable / labels
///   └───────────────┘          └──────────┘
///           │                         │
///           └────────────┬────────────┘
///                        ▼
///                 ┌────────────┐
///                 │ artifacts  │  locate fixed files, check consistency
///                 └────────────┘
/// ```

pub mod artifacts;
pub mod loader;
pub mod model;
