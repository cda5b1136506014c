use std::collections::HashMap;

use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

use crate::data::model::{normalize_category, FeatureMatrix, FeatureTable, RawValue};
use crate::error::{ExplainError, Result};

// ---------------------------------------------------------------------------
// Fitted column transformer
// ---------------------------------------------------------------------------

/// What happens to input columns no transformer claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remainder {
    #[default]
    Drop,
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Unseen levels encode as all zeros.
    Ignore,
}

/// One fitted step of the column transformer. Parameters are stored per
/// column, in the order of `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transformer {
    /// `(x - mean) / scale`
    StandardScaler {
        name: String,
        columns: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    OneHotEncoder {
        name: String,
        columns: Vec<String>,
        categories: Vec<Vec<String>>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
        /// Index of the dropped category per column (empty = none dropped).
        #[serde(default)]
        drop: Vec<Option<usize>>,
    },
    Passthrough {
        name: String,
        columns: Vec<String>,
    },
}

impl Transformer {
    pub fn name(&self) -> &str {
        match self {
            Transformer::StandardScaler { name, .. }
            | Transformer::OneHotEncoder { name, .. }
            | Transformer::Passthrough { name, .. } => name,
        }
    }

    pub fn columns(&self) -> &[String] {
        match self {
            Transformer::StandardScaler { columns, .. }
            | Transformer::OneHotEncoder { columns, .. }
            | Transformer::Passthrough { columns, .. } => columns,
        }
    }
}

/// A fitted preprocessing step mapping raw records to a numeric matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    /// Raw column names seen at fit time, in order.
    pub feature_names_in: Vec<String>,
    pub transformers: Vec<Transformer>,
    #[serde(default)]
    pub remainder: Remainder,
}

impl ColumnTransformer {
    /// Structural checks run once at load time.
    pub fn validate(&self) -> anyhow::Result<()> {
        for t in &self.transformers {
            let n = t.columns().len();
            for col in t.columns() {
                ensure!(
                    self.feature_names_in.contains(col),
                    "transformer '{}' uses unknown column '{col}'",
                    t.name()
                );
            }
            match t {
                Transformer::StandardScaler { mean, scale, .. } => {
                    ensure!(
                        mean.len() == n && scale.len() == n,
                        "scaler '{}': {n} columns but {} means and {} scales",
                        t.name(),
                        mean.len(),
                        scale.len()
                    );
                }
                Transformer::OneHotEncoder {
                    categories, drop, ..
                } => {
                    ensure!(
                        categories.len() == n,
                        "encoder '{}': {n} columns but {} category lists",
                        t.name(),
                        categories.len()
                    );
                    if !drop.is_empty() && drop.len() != n {
                        bail!("encoder '{}': drop list must cover every column", t.name());
                    }
                    for (cats, dropped) in categories.iter().zip(drop) {
                        if let Some(d) = dropped {
                            ensure!(*d < cats.len(), "encoder '{}': drop index {d} out of range", t.name());
                        }
                    }
                }
                Transformer::Passthrough { .. } => {}
            }
        }
        Ok(())
    }

    /// Input columns not claimed by any transformer, in fit order.
    fn remainder_columns(&self) -> Vec<&String> {
        if self.remainder == Remainder::Drop {
            return Vec::new();
        }
        self.feature_names_in
            .iter()
            .filter(|c| !self.transformers.iter().any(|t| t.columns().contains(c)))
            .collect()
    }

    /// Output feature names, `{transformer}__{column}` plus `_{category}` for
    /// one-hot indicators.
    pub fn feature_names_out(&self) -> Vec<String> {
        let mut names = Vec::new();
        for t in &self.transformers {
            match t {
                Transformer::StandardScaler { name, columns, .. }
                | Transformer::Passthrough { name, columns } => {
                    names.extend(columns.iter().map(|c| format!("{name}__{c}")));
                }
                Transformer::OneHotEncoder {
                    name,
                    columns,
                    categories,
                    drop,
                    ..
                } => {
                    for (k, (col, cats)) in columns.iter().zip(categories).enumerate() {
                        let dropped = drop.get(k).copied().flatten();
                        for (c, cat) in cats.iter().enumerate() {
                            if Some(c) != dropped {
                                names.push(format!("{name}__{col}_{cat}"));
                            }
                        }
                    }
                }
            }
        }
        names.extend(
            self.remainder_columns()
                .into_iter()
                .map(|c| format!("remainder__{c}")),
        );
        names
    }

    /// Apply the fitted parameters to every row of `table`. Never re-fits.
    pub fn transform(&self, table: &FeatureTable) -> Result<FeatureMatrix> {
        let index: HashMap<&str, usize> = table
            .column_names
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let lookup = |col: &String| -> Result<usize> {
            index
                .get(col.as_str())
                .copied()
                .ok_or_else(|| ExplainError::TransformMismatch {
                    column: col.clone(),
                    reason: "missing from input table".into(),
                })
        };

        // Resolve every referenced column once.
        let mut resolved: HashMap<&String, usize> = HashMap::new();
        for col in self.transformers.iter().flat_map(|t| t.columns()) {
            resolved.insert(col, lookup(col)?);
        }
        let remainder: Vec<(&String, usize)> = self
            .remainder_columns()
            .into_iter()
            .map(|c| lookup(c).map(|i| (c, i)))
            .collect::<Result<_>>()?;

        // Fitted categories in the spelling cells are matched with.
        let levels: Vec<Vec<Vec<String>>> = self
            .transformers
            .iter()
            .map(|t| match t {
                Transformer::OneHotEncoder { categories, .. } => categories
                    .iter()
                    .map(|cats| cats.iter().map(|c| normalize_category(c)).collect())
                    .collect(),
                _ => Vec::new(),
            })
            .collect();

        let n_out = self.feature_names_out().len();
        let mut out = FeatureMatrix::zeros((table.len(), n_out));

        for row in 0..table.len() {
            let mut target = out.row_mut(row);
            let mut j = 0;
            for (t, levels) in self.transformers.iter().zip(&levels) {
                match t {
                    Transformer::StandardScaler {
                        columns,
                        mean,
                        scale,
                        ..
                    } => {
                        for (k, col) in columns.iter().enumerate() {
                            let x = numeric(table.value(row, resolved[col]), col, row)?;
                            let s = if scale[k] == 0.0 { 1.0 } else { scale[k] };
                            target[j] = (x - mean[k]) / s;
                            j += 1;
                        }
                    }
                    Transformer::OneHotEncoder {
                        columns,
                        handle_unknown,
                        drop,
                        ..
                    } => {
                        for (k, col) in columns.iter().enumerate() {
                            let cats = &levels[k];
                            let dropped = drop.get(k).copied().flatten();
                            let value = table.value(row, resolved[col]);
                            let hit = value
                                .category_key()
                                .and_then(|key| cats.iter().position(|c| *c == key));
                            if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                                return Err(ExplainError::TransformMismatch {
                                    column: col.clone(),
                                    reason: format!("row {row}: unseen category '{value}'"),
                                });
                            }
                            for c in 0..cats.len() {
                                if Some(c) == dropped {
                                    continue;
                                }
                                target[j] = if hit == Some(c) { 1.0 } else { 0.0 };
                                j += 1;
                            }
                        }
                    }
                    Transformer::Passthrough { columns, .. } => {
                        for col in columns {
                            target[j] = numeric(table.value(row, resolved[col]), col, row)?;
                            j += 1;
                        }
                    }
                }
            }
            for (col, i) in &remainder {
                target[j] = numeric(table.value(row, *i), col, row)?;
                j += 1;
            }
        }

        Ok(out)
    }
}

fn numeric(value: &RawValue, column: &str, row: usize) -> Result<f64> {
    value.as_f64().ok_or_else(|| ExplainError::TransformMismatch {
        column: column.to_string(),
        reason: format!("row {row}: expected a number, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use ndarray::s;
    use pretty_assertions::assert_eq;

    use super::*;

    fn transformer() -> ColumnTransformer {
        ColumnTransformer {
            feature_names_in: vec!["Age".into(), "Dept".into(), "Overtime".into(), "Id".into()],
            transformers: vec![
                Transformer::StandardScaler {
                    name: "num".into(),
                    columns: vec!["Age".into()],
                    mean: vec![40.0],
                    scale: vec![10.0],
                },
                Transformer::OneHotEncoder {
                    name: "cat".into(),
                    columns: vec!["Dept".into(), "Overtime".into()],
                    categories: vec![
                        vec!["HR".into(), "Sales".into(), "R&D".into()],
                        vec!["No".into(), "Yes".into()],
                    ],
                    handle_unknown: HandleUnknown::Error,
                    drop: vec![None, Some(0)],
                },
            ],
            remainder: Remainder::Passthrough,
        }
    }

    fn table(dept: &str) -> FeatureTable {
        FeatureTable::new(
            vec!["Id".into(), "Overtime".into(), "Dept".into(), "Age".into()],
            vec![vec![
                RawValue::Integer(7),
                RawValue::String("Yes".into()),
                RawValue::String(dept.into()),
                RawValue::Integer(55),
            ]],
        )
    }

    #[test]
    fn output_names_follow_transformer_order() {
        assert_eq!(
            transformer().feature_names_out(),
            vec![
                "num__Age",
                "cat__Dept_HR",
                "cat__Dept_Sales",
                "cat__Dept_R&D",
                "cat__Overtime_Yes",
                "remainder__Id",
            ]
        );
    }

    #[test]
    fn transform_uses_fitted_parameters_regardless_of_column_order() {
        let ct = transformer();
        ct.validate().unwrap();
        let m = ct.transform(&table("Sales")).unwrap();
        assert_eq!(m.ncols(), 6);
        assert_eq!(m.row(0).to_vec(), vec![1.5, 0.0, 1.0, 0.0, 1.0, 7.0]);
    }

    #[test]
    fn unseen_category_is_a_mismatch() {
        let err = transformer().transform(&table("Legal")).unwrap_err();
        match err {
            ExplainError::TransformMismatch { column, reason } => {
                assert_eq!(column, "Dept");
                assert!(reason.contains("Legal"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unseen_category_is_zeros_when_ignored() {
        let mut ct = transformer();
        if let Transformer::OneHotEncoder { handle_unknown, .. } = &mut ct.transformers[1] {
            *handle_unknown = HandleUnknown::Ignore;
        }
        let m = ct.transform(&table("Legal")).unwrap();
        assert_eq!(m.slice(s![0, 1..4]).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn python_spelled_categories_match_loaded_cells() {
        let ct = ColumnTransformer {
            feature_names_in: vec!["Remote".into(), "Level".into()],
            transformers: vec![Transformer::OneHotEncoder {
                name: "cat".into(),
                columns: vec!["Remote".into(), "Level".into()],
                categories: vec![
                    vec!["False".into(), "True".into()],
                    vec!["1.0".into(), "2.0".into()],
                ],
                handle_unknown: HandleUnknown::Error,
                drop: Vec::new(),
            }],
            remainder: Remainder::Drop,
        };
        let t = FeatureTable::new(
            vec!["Remote".into(), "Level".into()],
            vec![
                vec![RawValue::Bool(true), RawValue::Float(1.0)],
                vec![RawValue::String("False".into()), RawValue::Integer(2)],
            ],
        );
        let m = ct.transform(&t).unwrap();
        assert_eq!(m.row(0).to_vec(), vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(m.row(1).to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn missing_input_column_is_a_mismatch() {
        let mut t = table("HR");
        t.column_names[3] = "Years".into();
        assert!(matches!(
            transformer().transform(&t),
            Err(ExplainError::TransformMismatch { column, .. }) if column == "Age"
        ));
    }

    #[test]
    fn validate_rejects_mismatched_parameter_lengths() {
        let mut ct = transformer();
        ct.transformers[0] = Transformer::StandardScaler {
            name: "num".into(),
            columns: vec!["Age".into()],
            mean: vec![40.0, 1.0],
            scale: vec![10.0],
        };
        assert!(ct.validate().is_err());
    }

    #[test]
    fn deserializes_tagged_json() {
        let json = r#"{
            "feature_names_in": ["A", "B"],
            "transformers": [
                {"kind": "passthrough", "name": "p", "columns": ["A"]},
                {"kind": "one_hot_encoder", "name": "c", "columns": ["B"], "categories": [["x", "y"]]}
            ]
        }"#;
        let ct: ColumnTransformer = serde_json::from_str(json).unwrap();
        assert_eq!(ct.remainder, Remainder::Drop);
        assert_eq!(ct.feature_names_out(), vec!["p__A", "c__B_x", "c__B_y"]);
    }
}
