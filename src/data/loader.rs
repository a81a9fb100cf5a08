use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::PipelineError;
use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Parsing options for delimited sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter; `b';'` reads the raw SILSO download.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a headerless comma-separated file, labelling its columns with
/// `column_names` in order.
pub fn load(path: &Path, column_names: &[&str]) -> Result<Table, PipelineError> {
    load_with_options(path, column_names, &LoadOptions::default())
}

/// Load a table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – flat numeric columns, matched to names by position
/// * anything else      – headerless delimited text
pub fn load_with_options(
    path: &Path,
    column_names: &[&str],
    options: &LoadOptions,
) -> Result<Table, PipelineError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let location = path.display().to_string();
    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path, column_names),
        _ => {
            let file = File::open(path).map_err(|e| PipelineError::unavailable(&location, e))?;
            load_reader(file, column_names, options, &location)
        }
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Parse headerless delimited text from any reader. `location` only feeds
/// error messages.
///
/// Each field is read as an integer, then as a float; an empty field is
/// `Null`. A column holding any float is promoted to floats throughout.
pub fn load_reader<R: Read>(
    reader: R,
    column_names: &[&str],
    options: &LoadOptions,
    location: &str,
) -> Result<Table, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::unavailable(location, e))?;

    // Shape is checked over every row before the names are compared.
    if let Some(first) = records.first() {
        let width = first.len();
        let ragged = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width);
        if let Some((row_no, record)) = ragged {
            return Err(PipelineError::unavailable(
                location,
                format!("row {row_no} has {} fields, expected {width}", record.len()),
            ));
        }
        if width != column_names.len() {
            return Err(PipelineError::SchemaMismatch {
                expected: column_names.len(),
                found: width,
            });
        }
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); column_names.len()];

    for (row_no, record) in records.iter().enumerate() {
        for ((field, column), name) in record.iter().zip(cells.iter_mut()).zip(column_names) {
            let value = parse_cell(field).ok_or_else(|| {
                PipelineError::unavailable(
                    location,
                    format!("row {row_no}, column '{name}': '{field}' is not a number"),
                )
            })?;
            column.push(value);
        }
    }

    let columns = column_names
        .iter()
        .zip(cells)
        .map(|(name, values)| {
            let mut column = Column::new(*name, values);
            column.unify_numeric_type();
            column
        })
        .collect();

    let table = Table::from_columns(columns);
    log::debug!("loaded {} rows from {location}", table.len());
    Ok(table)
}

fn parse_cell(s: &str) -> Option<CellValue> {
    if s.is_empty() {
        return Some(CellValue::Null);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(CellValue::Integer(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_nan() => Some(CellValue::Null),
        Ok(f) => Some(CellValue::Float(f)),
        Err(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat numeric columns. Column names inside the file
/// are ignored; `column_names` labels the columns by position.
fn load_parquet(path: &Path, column_names: &[&str]) -> Result<Table, PipelineError> {
    let location = path.display().to_string();
    let file = File::open(path).map_err(|e| PipelineError::unavailable(&location, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| PipelineError::unavailable(&location, e))?;

    let n_fields = builder.schema().fields().len();
    if n_fields != column_names.len() {
        return Err(PipelineError::SchemaMismatch {
            expected: column_names.len(),
            found: n_fields,
        });
    }

    let reader = builder
        .build()
        .map_err(|e| PipelineError::unavailable(&location, e))?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); column_names.len()];

    for batch_result in reader {
        let batch = batch_result.map_err(|e| PipelineError::unavailable(&location, e))?;
        for (col_idx, col_array) in batch.columns().iter().enumerate() {
            let column = &mut cells[col_idx];
            column.reserve(batch.num_rows());
            for row in 0..batch.num_rows() {
                let value = extract_cell(col_array, row).ok_or_else(|| {
                    PipelineError::unavailable(
                        &location,
                        format!(
                            "column '{}' has unsupported type {:?}",
                            column_names[col_idx],
                            col_array.data_type()
                        ),
                    )
                })?;
                column.push(value);
            }
        }
    }

    let columns = column_names
        .iter()
        .zip(cells)
        .map(|(name, values)| Column::new(*name, values))
        .collect();

    let table = Table::from_columns(columns);
    log::debug!("loaded {} rows from {location}", table.len());
    Ok(table)
}

/// Extract a single cell from an Arrow column; `None` for non-numeric types.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Option<CellValue> {
    if col.is_null(row) {
        return Some(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Null => CellValue::Null,
        _ => return None,
    };
    Some(value)
}
