use super::error::PipelineError;
use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Range predicate on one numeric column
// ---------------------------------------------------------------------------

/// Return indices of rows whose `column_name` value lies in `[low, high]`.
///
/// A row passes when:
/// * its cell is defined → passes if `low <= value <= high`
/// * its cell is `Null`  → fails
///
/// An inverted range (`low > high`) matches nothing.
pub fn range_indices(
    table: &Table,
    column_name: &str,
    (low, high): (f64, f64),
) -> Result<Vec<usize>, PipelineError> {
    let column = table.column(column_name)?;
    Ok(column
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_f64().is_some_and(|x| low <= x && x <= high))
        .map(|(i, _)| i)
        .collect())
}

/// New table with exactly the rows whose `column_name` value lies in
/// `[low, high]`, in original order and with all columns.
pub fn filter_range(
    table: &Table,
    column_name: &str,
    bounds: (f64, f64),
) -> Result<Table, PipelineError> {
    let indices = range_indices(table, column_name, bounds)?;
    Ok(table.take(&indices))
}

/// New table where cells of `column_name` equal to `sentinel` are `Null`.
pub fn mask_sentinel(
    table: &Table,
    column_name: &str,
    sentinel: f64,
) -> Result<Table, PipelineError> {
    let column = table.column(column_name)?;
    let values = column
        .values
        .iter()
        .map(|v| match v.as_f64() {
            Some(x) if x == sentinel => CellValue::Null,
            _ => *v,
        })
        .collect();
    Ok(table.with_column(Column::new(column_name, values)))
}
