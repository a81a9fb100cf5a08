//! Per-visualization compositions of the data layer.
//!
//! Every call re-reads the backing file; nothing is cached between calls.

use std::path::PathBuf;

use crate::data::derive::{cycle_fold, rolling_mean};
use crate::data::filter::{filter_range, mask_sentinel};
use crate::data::loader::{load_with_options, LoadOptions};
use crate::data::model::{DATE_FRAC, OBSERVATION_COLUMNS, TOTAL_SPOT_NUM, YEAR};
use crate::data::{PipelineError, Table};

/// Where and how to read the observation table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    pub path: PathBuf,
    pub column_names: Vec<String>,
    pub options: LoadOptions,
    /// Value of `total_spot_num` that marks a missing observation.
    pub missing_sentinel: Option<f64>,
}

impl DataSource {
    /// A source with the standard monthly column layout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            column_names: OBSERVATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            options: LoadOptions::default(),
            missing_sentinel: None,
        }
    }

    /// Read the file and keep the rows whose year lies in `years`.
    pub fn load_years(&self, (low, high): (i64, i64)) -> Result<Table, PipelineError> {
        let names: Vec<&str> = self.column_names.iter().map(String::as_str).collect();
        let mut table = load_with_options(&self.path, &names, &self.options)?;
        if let Some(sentinel) = self.missing_sentinel {
            table = mask_sentinel(&table, TOTAL_SPOT_NUM, sentinel)?;
        }
        filter_range(&table, YEAR, (low as f64, high as f64))
    }
}

/// Rows within `years` with a `months`-row trailing mean of the sunspot count.
pub fn smoothed_series(
    source: &DataSource,
    years: (i64, i64),
    months: usize,
) -> Result<Table, PipelineError> {
    let table = source.load_years(years)?;
    let table = rolling_mean(&table, TOTAL_SPOT_NUM, months)?;
    log::debug!(
        "smoothed series: {} rows for {years:?}, window {months}",
        table.len()
    );
    Ok(table)
}

/// Rows within `years` with the fractional year folded into `cycle_years`.
pub fn cycle_series(
    source: &DataSource,
    years: (i64, i64),
    cycle_years: f64,
) -> Result<Table, PipelineError> {
    let table = source.load_years(years)?;
    let table = cycle_fold(&table, DATE_FRAC, cycle_years)?;
    log::debug!(
        "cycle series: {} rows for {years:?}, cycle {cycle_years}",
        table.len()
    );
    Ok(table)
}
