use super::error::PipelineError;
use super::model::{CellValue, Column, Table, CYCLE, ROLLING_AVG};

// ---------------------------------------------------------------------------
// Trailing rolling mean
// ---------------------------------------------------------------------------

/// Trailing mean over windows of `window_size` values ending at each index.
///
/// Indices before the window fills, and windows that contain an undefined
/// input, yield `None`. A window longer than `values` yields all `None`.
pub fn trailing_mean(values: &[Option<f64>], window_size: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|index| {
            if index + 1 < window_size {
                return None;
            }
            let window = &values[index + 1 - window_size..=index];
            let sum = window.iter().try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
            Some(sum / window_size as f64)
        })
        .collect()
}

/// New table with [`ROLLING_AVG`] holding the trailing mean of
/// `value_column` over `window_size` rows.
pub fn rolling_mean(
    table: &Table,
    value_column: &str,
    window_size: usize,
) -> Result<Table, PipelineError> {
    if window_size == 0 {
        return Err(PipelineError::InvalidWindow(window_size));
    }
    let values = table.numeric_values(value_column)?;
    let averaged = trailing_mean(&values, window_size)
        .into_iter()
        .map(CellValue::from_option)
        .collect();
    Ok(table.with_column(Column::new(ROLLING_AVG, averaged)))
}

// ---------------------------------------------------------------------------
// Cycle fold
// ---------------------------------------------------------------------------

/// Remainder of `value` by `cycle_length`, always in `[0, cycle_length)`.
pub fn fold_into_cycle(value: f64, cycle_length: f64) -> f64 {
    let r = value.rem_euclid(cycle_length);
    // rem_euclid rounds up to cycle_length for tiny negative inputs
    if r >= cycle_length {
        0.0
    } else {
        r
    }
}

/// New table with [`CYCLE`] holding `fractional_column` folded into a
/// period of `cycle_length`.
pub fn cycle_fold(
    table: &Table,
    fractional_column: &str,
    cycle_length: f64,
) -> Result<Table, PipelineError> {
    if !(cycle_length.is_finite() && cycle_length > 0.0) {
        return Err(PipelineError::InvalidCycleLength(cycle_length));
    }
    let folded = table
        .numeric_values(fractional_column)?
        .into_iter()
        .map(|v| CellValue::from_option(v.map(|x| fold_into_cycle(x, cycle_length))))
        .collect();
    Ok(table.with_column(Column::new(CYCLE, folded)))
}
