//! Synthetic, self-consistent artifacts shared by unit tests.

use std::path::Path;

use crate::data::artifacts::Artifacts;
use crate::data::model::{FeatureTable, RawValue};
use crate::pipeline::classifier::LogisticRegression;
use crate::pipeline::preprocess::{ColumnTransformer, HandleUnknown, Remainder, Transformer};
use crate::pipeline::TrainedPipeline;
use crate::session::Session;

pub const LEVELS: usize = 5;

pub struct Fixture {
    pub pipeline: TrainedPipeline,
    pub x_train: FeatureTable,
    pub x_test: FeatureTable,
    pub y_test: Vec<i64>,
}

/// `n_num` scaled numeric columns and `n_cat` one-hot columns with five
/// levels each, i.e. `n_num + 5 * n_cat` output features.
pub fn attrition(n_rows: usize, n_num: usize, n_cat: usize) -> Fixture {
    let num_cols: Vec<String> = (0..n_num).map(|j| format!("Num{j}")).collect();
    let cat_cols: Vec<String> = (0..n_cat).map(|k| format!("Cat{k}")).collect();
    let columns: Vec<String> = num_cols.iter().chain(&cat_cols).cloned().collect();

    let x_train = table(&columns, n_num, n_cat, n_rows * 2, 100);
    let x_test = table(&columns, n_num, n_cat, n_rows, 0);

    let (mean, scale): (Vec<f64>, Vec<f64>) = (0..n_num)
        .map(|j| {
            let col: Vec<f64> = x_train.rows.iter().filter_map(|r| r[j].as_f64()).collect();
            let m = col.iter().sum::<f64>() / col.len() as f64;
            let var = col.iter().map(|v| (v - m).powi(2)).sum::<f64>() / col.len() as f64;
            (m, if var == 0.0 { 1.0 } else { var.sqrt() })
        })
        .unzip();

    let preprocessor = ColumnTransformer {
        feature_names_in: columns,
        transformers: vec![
            Transformer::StandardScaler {
                name: "num".into(),
                columns: num_cols,
                mean,
                scale,
            },
            Transformer::OneHotEncoder {
                name: "cat".into(),
                columns: cat_cols,
                categories: vec![(0..LEVELS).map(|m| format!("L{m}")).collect(); n_cat],
                handle_unknown: HandleUnknown::Error,
                drop: Vec::new(),
            },
        ],
        remainder: Remainder::Drop,
    };

    let n_out = n_num + LEVELS * n_cat;
    let classifier = LogisticRegression {
        coef: vec![(0..n_out).map(|j| ((j as f64 + 1.0) * 0.37).sin()).collect()],
        intercept: vec![-0.3],
        classes: vec![0, 1],
    };
    let pipeline = TrainedPipeline {
        preprocessor,
        classifier,
    };

    let y_test = pipeline
        .predict(&x_test)
        .unwrap_or_else(|e| panic!("fixture does not transform: {e}"));

    Fixture {
        pipeline,
        x_train,
        x_test,
        y_test,
    }
}

/// A ready session over [`attrition`] data.
pub fn session(n_rows: usize, n_num: usize, n_cat: usize) -> Session {
    let fx = attrition(n_rows, n_num, n_cat);
    Session::from_artifacts(Path::new("."), fx.into_artifacts())
        .unwrap_or_else(|e| panic!("fixture session failed: {e}"))
}

impl Fixture {
    pub fn into_artifacts(self) -> Artifacts {
        Artifacts {
            pipeline: self.pipeline,
            x_test: self.x_test,
            x_train: self.x_train,
            y_test: self.y_test,
        }
    }
}

fn table(columns: &[String], n_num: usize, n_cat: usize, n_rows: usize, offset: usize) -> FeatureTable {
    let rows = (offset..offset + n_rows)
        .map(|i| {
            let mut row: Vec<RawValue> = (0..n_num)
                .map(|j| RawValue::Float(((i * (j + 3) + 7 * j) % 23) as f64 + 0.5 * j as f64))
                .collect();
            row.extend((0..n_cat).map(|k| RawValue::String(format!("L{}", (i * (k + 2) + k) % LEVELS))));
            row
        })
        .collect();
    FeatureTable::new(columns.to_vec(), rows)
}

/// Write the fixture as an artifact folder (pipeline JSON + CSV tables).
pub fn write_folder(dir: &Path, fx: &Fixture) {
    let json = serde_json::to_string_pretty(&fx.pipeline).unwrap();
    std::fs::write(dir.join(crate::config::PIPELINE_FILE), json).unwrap();
    write_csv(&dir.join("X_test.csv"), &fx.x_test);
    write_csv(&dir.join("X_train.csv"), &fx.x_train);

    let labels = FeatureTable::new(
        vec!["Attrition".into()],
        fx.y_test.iter().map(|&y| vec![RawValue::Integer(y)]).collect(),
    );
    write_csv(&dir.join("y_test.csv"), &labels);
}

fn write_csv(path: &Path, table: &FeatureTable) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(&table.column_names).unwrap();
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|v| match v {
                RawValue::Float(f) => f.to_string(),
                RawValue::Null => String::new(),
                other => other.to_string(),
            }))
            .unwrap();
    }
    writer.flush().unwrap();
}
