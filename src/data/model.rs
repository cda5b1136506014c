use std::fmt;

use ndarray::Array2;

// ---------------------------------------------------------------------------
// RawValue – a single cell in a raw feature table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v:.4}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl RawValue {
    /// Numeric view used by scalers and passthrough columns.
    /// Missing values (null or NaN) yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(v) if !v.is_nan() => Some(*v),
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Key used to match a cell against a fitted category list, in the
    /// spelling produced by [`normalize_category`].
    pub fn category_key(&self) -> Option<String> {
        match self {
            RawValue::String(s) => Some(normalize_category(s)),
            RawValue::Integer(i) => Some(i.to_string()),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Float(v) => float_key(*v),
            RawValue::Null => None,
        }
    }

    /// Interpret the cell as a class label.
    pub fn as_label(&self) -> Option<i64> {
        match self {
            RawValue::Integer(i) => Some(*i),
            RawValue::Bool(b) => Some(i64::from(*b)),
            RawValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            RawValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Canonical spelling of a category so that exported labels and loaded cells
/// agree: bools compare case-insensitively (`True` → `true`) and numbers
/// by value (`1.0` → `1`). Anything else is kept verbatim.
pub fn normalize_category(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return trimmed.to_ascii_lowercase();
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => float_key(v).unwrap_or_else(|| s.to_string()),
        _ => s.to_string(),
    }
}

/// Integral floats use their integer spelling (`3.0` → `"3"`).
fn float_key(v: f64) -> Option<String> {
    if v.is_nan() {
        None
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        Some((v as i64).to_string())
    } else {
        Some(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// FeatureTable – raw labelled records, one per employee
// ---------------------------------------------------------------------------

/// Row-major raw table with an ordered column index.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl FeatureTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        FeatureTable { column_names, rows }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A single cell, `Null` if the row is shorter than the header.
    pub fn value(&self, row: usize, col: usize) -> &RawValue {
        self.rows[row].get(col).unwrap_or(&RawValue::Null)
    }

    /// Copy of the selected rows, keeping the column index.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureTable {
        FeatureTable {
            column_names: self.column_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureMatrix – dense numeric output of the preprocessing step
// ---------------------------------------------------------------------------

/// Rows are records, columns are output features.
pub type FeatureMatrix = Array2<f64>;
