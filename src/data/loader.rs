use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FeatureTable, RawValue};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a raw feature table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – any flat schema (Pandas `df.to_parquet()` / Polars output)
/// * `.json`    – `[{ "Age": 41, "Department": "Sales", ... }, ...]`
///                or `{ "columns": [...], "data": [[...], ...] }`
/// * `.csv`     – header row, one record per line
pub fn load_table(path: &Path) -> Result<FeatureTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load a label vector: the first column of a table, integer-valued.
pub fn load_labels(path: &Path) -> Result<Vec<i64>> {
    let table = load_table(path)?;
    if table.column_names.is_empty() {
        bail!("label table has no columns");
    }
    (0..table.len())
        .map(|row| {
            let value = table.value(row, 0);
            value
                .as_label()
                .with_context(|| format!("Row {row}: '{value}' is not an integer label"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Two layouts are accepted, the defaults of `df.to_json(orient='records')`
/// and `df.to_json(orient='split')`:
///
/// ```json
/// [ { "Age": 41, "Department": "Sales" }, ... ]
/// { "columns": ["Age", "Department"], "data": [[41, "Sales"], ...] }
/// ```
fn load_json(path: &Path) -> Result<FeatureTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    match &root {
        JsonValue::Array(records) => json_records(records),
        JsonValue::Object(obj) if obj.contains_key("columns") => json_split(obj),
        _ => bail!("Expected a records array or a split-oriented object"),
    }
}

fn json_records(records: &[JsonValue]) -> Result<FeatureTable> {
    let mut column_names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|rec| {
            column_names
                .iter()
                .map(|col| rec.get(col).map(json_to_raw).unwrap_or(RawValue::Null))
                .collect()
        })
        .collect();

    Ok(FeatureTable::new(column_names, rows))
}

fn json_split(obj: &serde_json::Map<String, JsonValue>) -> Result<FeatureTable> {
    let column_names: Vec<String> = obj
        .get("columns")
        .and_then(|c| c.as_array())
        .context("'columns' must be an array")?
        .iter()
        .map(|c| match c {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    let data = obj
        .get("data")
        .and_then(|d| d.as_array())
        .context("missing 'data' array")?;

    let mut rows = Vec::with_capacity(data.len());
    for (i, row) in data.iter().enumerate() {
        let cells = row
            .as_array()
            .with_context(|| format!("Row {i} is not an array"))?;
        if cells.len() != column_names.len() {
            bail!(
                "Row {i}: {} cells for {} columns",
                cells.len(),
                column_names.len()
            );
        }
        rows.push(cells.iter().map(json_to_raw).collect());
    }

    Ok(FeatureTable::new(column_names, rows))
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, cell types are guessed.
/// A leading unnamed column (a written Pandas index) is skipped.
fn load_csv(path: &Path) -> Result<FeatureTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let skip_index = headers.first().is_some_and(|h| h.is_empty());
    let column_names: Vec<String> = headers.iter().skip(usize::from(skip_index)).cloned().collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<RawValue> = record
            .iter()
            .skip(usize::from(skip_index))
            .map(guess_raw_type)
            .collect();
        if row.len() != column_names.len() {
            bail!(
                "CSV row {row_no}: {} cells for {} columns",
                row.len(),
                column_names.len()
            );
        }
        rows.push(row);
    }

    Ok(FeatureTable::new(column_names, rows))
}

fn guess_raw_type(s: &str) -> RawValue {
    if s.is_empty() {
        return RawValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return RawValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return RawValue::Float(f);
    }
    match s {
        "true" | "True" => RawValue::Bool(true),
        "false" | "False" => RawValue::Bool(false),
        _ => RawValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Every top-level column becomes a raw column;
/// dictionary-encoded columns (Pandas `category`) are decoded, decimals are
/// read as floats, dates and timestamps as their text form, and a stored
/// Pandas index (`__index_level_N__`) is skipped.
fn load_parquet(path: &Path) -> Result<FeatureTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let kept: Vec<(usize, String)> = builder
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.name().starts_with("__index_level_"))
        .map(|(i, f)| (i, f.name().clone()))
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let columns: Vec<ArrayRef> = kept
            .iter()
            .map(|(i, name)| {
                normalize_column(batch.column(*i)).with_context(|| format!("column '{name}'"))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|col| extract_raw_value(col, row)).collect());
        }
    }

    let column_names = kept.into_iter().map(|(_, name)| name).collect();
    Ok(FeatureTable::new(column_names, rows))
}

// -- Parquet / Arrow helpers --

/// Cast a column to one of the types `extract_raw_value` reads directly.
fn normalize_column(col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Dictionary(_, value_type) => {
            let decoded = arrow::compute::cast(col, value_type.as_ref())
                .context("decoding dictionary column")?;
            return normalize_column(&decoded);
        }
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::Boolean => return Ok(col.clone()),
        DataType::Float16 | DataType::Decimal128(..) | DataType::Decimal256(..) => {
            DataType::Float64
        }
        _ => DataType::Utf8,
    };
    arrow::compute::cast(col, &target)
        .with_context(|| format!("reading {} as {target}", col.data_type()))
}

/// Extract a single raw value from an Arrow column at a given row.
fn extract_raw_value(col: &ArrayRef, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => RawValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => RawValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => RawValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => RawValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => RawValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => RawValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => RawValue::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => RawValue::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => RawValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => RawValue::Integer(col.as_primitive::<UInt64Type>().value(row) as i64),
        DataType::Float32 => RawValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => RawValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => RawValue::Bool(col.as_boolean().value(row)),
        // normalize_column leaves no other type behind
        _ => RawValue::Null,
    }
}
