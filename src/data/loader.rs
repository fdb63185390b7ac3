use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DatasetError;
use super::model::{CellValue, ListingsTable};
use super::prepare::prepare;

/// Text cells read as missing values.
const NA_MARKERS: [&str; 12] = [
    "", "nan", "NaN", "-nan", "NA", "N/A", "n/a", "<NA>", "NULL", "null", "None", "#N/A",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and prepare a listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one listing per line (recommended)
/// * `.parquet` – columns written by `df.to_parquet()` or Polars
/// * `.json`    – `[{ "Name": ..., "Price": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<ListingsTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    };

    prepare(raw).with_context(|| format!("preparing {}", path.display()))
}

/// Load and prepare a CSV table from any reader.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<ListingsTable> {
    let raw = read_csv(reader)?;
    Ok(prepare(raw)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every field plain text.
/// Column types are inferred from the text after the whole file is read.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<ListingsTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        raw_rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    let mut records: Vec<Vec<CellValue>> = vec![Vec::with_capacity(headers.len()); raw_rows.len()];
    for col_idx in 0..headers.len() {
        let column: Vec<Option<&str>> = raw_rows
            .iter()
            .map(|row| row.get(col_idx).map(String::as_str).filter(|v| !is_na(v)))
            .collect();
        for (record, cell) in records.iter_mut().zip(parse_text_column(&column)) {
            record.push(cell);
        }
    }

    log::debug!("read {} CSV rows with {} columns", records.len(), headers.len());
    Ok(ListingsTable::from_records(headers, records))
}

fn is_na(s: &str) -> bool {
    NA_MARKERS.contains(&s.trim())
}

/// Type a whole text column at once: integers, then floats, then booleans,
/// falling back to the raw text.
fn parse_text_column(column: &[Option<&str>]) -> Vec<CellValue> {
    let present = || column.iter().flatten().map(|s| s.trim());

    if present().all(|s| s.parse::<i64>().is_ok()) {
        return column
            .iter()
            .map(|c| match c.and_then(|s| s.trim().parse::<i64>().ok()) {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Null,
            })
            .collect();
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return column
            .iter()
            .map(|c| match c.and_then(|s| s.trim().parse::<f64>().ok()) {
                Some(f) => CellValue::Float(f),
                None => CellValue::Null,
            })
            .collect();
    }
    if present().all(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")) {
        return column
            .iter()
            .map(|c| match c {
                Some(s) => CellValue::Bool(s.trim().eq_ignore_ascii_case("true")),
                None => CellValue::Null,
            })
            .collect();
    }
    column
        .iter()
        .map(|c| match c {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Null,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Name": "Cosy flat", "Price": 85, "Smart Location": "Paris, France", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ListingsTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<ListingsTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows: Vec<Vec<CellValue>> = objects
        .into_iter()
        .map(|obj| {
            column_names
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(ListingsTable::from_records(column_names, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings. Every column becomes a table column;
/// strings, integers, floats and booleans keep their types, anything else
/// is read as its display text.
fn load_parquet(path: &Path) -> Result<ListingsTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = (0..batch.num_columns())
                .map(|col_idx| extract_cell(batch.column(col_idx), row))
                .collect::<Vec<_>>();
            rows.push(cells);
        }
    }

    Ok(ListingsTable::from_records(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let typed = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => Some(CellValue::Text(col.as_string::<i64>().value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| float_cell(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| float_cell(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    typed.unwrap_or_else(|| match array_value_to_string(col, row) {
        Ok(text) => CellValue::Text(text),
        Err(e) => {
            log::warn!("unreadable {:?} cell at row {row}: {e}", col.data_type());
            CellValue::Null
        }
    })
}

/// NaN is how pandas writes a missing float.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}
