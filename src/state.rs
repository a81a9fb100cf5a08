use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::data::{PipelineError, Table};
use crate::imagery::asset_path;
use crate::pipeline::{cycle_series, smoothed_series, DataSource};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    pub config: DashboardConfig,
    source: DataSource,

    /// Selected `(low, high)` year range, `low <= high`.
    pub years: (i64, i64),
    /// Smoothing window in months.
    pub months: usize,
    /// Cycle length in years.
    pub cycle_years: f64,
    /// Selected image filter label.
    pub filter_label: String,

    /// Line chart data (None until a run succeeds).
    pub smoothed: Option<Table>,
    /// Scatter chart data (None until a run succeeds).
    pub folded: Option<Table>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    /// Validate the configuration, build the state and run both pipelines
    /// once. Pipeline failures land in `status_message`; a bad configuration
    /// is an error.
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut state = Self {
            source: config.data_source()?,
            years: config.initial_year_range(),
            months: config
                .smoothing_months
                .initial
                .clamp(config.smoothing_months.min, config.smoothing_months.max),
            cycle_years: config
                .cycle_years
                .initial
                .clamp(config.cycle_years.min, config.cycle_years.max),
            filter_label: config.initial_filter.clone(),
            smoothed: None,
            folded: None,
            status_message: None,
            config,
        };
        state.refresh_all();
        Ok(state)
    }

    pub fn data_path(&self) -> &std::path::Path {
        &self.source.path
    }

    /// Change the year range; both charts depend on it.
    pub fn set_years(&mut self, (low, high): (i64, i64)) {
        let (min, max) = self.config.year_bounds;
        let low = low.clamp(min, max);
        let high = high.clamp(low, max);
        if (low, high) == self.years {
            return;
        }
        self.years = (low, high);
        self.refresh_all();
    }

    /// Change the smoothing window; only the line chart depends on it.
    pub fn set_months(&mut self, months: usize) {
        let bounds = &self.config.smoothing_months;
        let months = months.clamp(bounds.min, bounds.max);
        if months == self.months {
            return;
        }
        self.months = months;
        self.status_message = None;
        self.refresh_smoothed();
    }

    /// Change the cycle length; only the scatter chart depends on it.
    pub fn set_cycle_years(&mut self, cycle_years: f64) {
        let bounds = &self.config.cycle_years;
        let cycle_years = cycle_years.clamp(bounds.min, bounds.max);
        if cycle_years == self.cycle_years {
            return;
        }
        self.cycle_years = cycle_years;
        self.status_message = None;
        self.refresh_folded();
    }

    pub fn set_filter_label(&mut self, label: impl Into<String>) {
        self.filter_label = label.into();
    }

    /// Point the dashboard at another observation file.
    pub fn set_data_path(&mut self, path: PathBuf) {
        log::info!("switching dataset to {}", path.display());
        self.config.data_path = path.clone();
        self.source.path = path;
        self.refresh_all();
    }

    /// Image for the selected filter; `None` when the label is not mapped.
    pub fn image_path(&self) -> Option<PathBuf> {
        asset_path(&self.config.assets_dir, &self.filter_label)
    }

    /// Re-run both pipelines.
    pub fn refresh_all(&mut self) {
        self.status_message = None;
        self.refresh_smoothed();
        self.refresh_folded();
    }

    fn refresh_smoothed(&mut self) {
        let result = smoothed_series(&self.source, self.years, self.months);
        self.smoothed = self.settle(result);
    }

    fn refresh_folded(&mut self) {
        let result = cycle_series(&self.source, self.years, self.cycle_years);
        self.folded = self.settle(result);
    }

    fn settle(&mut self, result: Result<Table, PipelineError>) -> Option<Table> {
        match result {
            Ok(table) => Some(table),
            Err(e) => {
                log::error!("pipeline failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{CellValue, ROLLING_AVG};

    fn write_rows(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(rows.as_bytes()).unwrap();
        file
    }

    fn state_for(file: &tempfile::NamedTempFile) -> DashboardState {
        DashboardState::new(DashboardConfig {
            data_path: file.path().to_path_buf(),
            smoothing_months: crate::config::SmoothingSettings {
                min: 1,
                max: 24,
                initial: 2,
            },
            ..DashboardConfig::default()
        })
        .unwrap()
    }

    const ROWS: &str = "1800,1,1800.042,10,1.0,5,1\n\
                        1800,2,1800.123,20,1.0,5,1\n\
                        1801,1,1801.042,30,1.0,5,1\n";

    #[test]
    fn initial_run_fills_both_charts() {
        let file = write_rows(ROWS);
        let state = state_for(&file);
        assert!(state.status_message.is_none());
        assert_eq!(state.smoothed.as_ref().unwrap().len(), 3);
        assert_eq!(state.folded.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn year_change_reruns_both_pipelines() {
        let file = write_rows(ROWS);
        let mut state = state_for(&file);
        state.set_years((1801, 1801));
        assert_eq!(state.smoothed.as_ref().unwrap().len(), 1);
        assert_eq!(state.folded.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn inverted_years_are_clamped_to_low() {
        let file = write_rows(ROWS);
        let mut state = state_for(&file);
        state.set_years((1900, 1800));
        assert_eq!(state.years, (1900, 1900));
    }

    #[test]
    fn months_are_clamped_and_applied() {
        let file = write_rows(ROWS);
        let mut state = state_for(&file);
        state.set_months(0);
        assert_eq!(state.months, 1);
        let avg = &state.smoothed.as_ref().unwrap().column(ROLLING_AVG).unwrap().values;
        assert_eq!(avg[0], CellValue::Float(10.0));
    }

    #[test]
    fn missing_file_reports_error() {
        let file = write_rows(ROWS);
        let mut state = state_for(&file);
        state.set_data_path(PathBuf::from("no/such/file.csv"));
        assert!(state.smoothed.is_none());
        assert!(state.folded.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("data unavailable"));
    }

    #[test]
    fn inverted_smoothing_bounds_are_rejected() {
        let file = write_rows(ROWS);
        let result = DashboardState::new(DashboardConfig {
            data_path: file.path().to_path_buf(),
            smoothing_months: crate::config::SmoothingSettings {
                min: 5,
                max: 1,
                initial: 3,
            },
            ..DashboardConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn inverted_cycle_bounds_are_rejected() {
        let file = write_rows(ROWS);
        let result = DashboardState::new(DashboardConfig {
            data_path: file.path().to_path_buf(),
            cycle_years: crate::config::CycleSettings {
                min: 13.0,
                max: 9.0,
                step: 0.1,
                initial: 11.0,
            },
            ..DashboardConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn malformed_delimiter_is_rejected() {
        let file = write_rows(ROWS);
        let result = DashboardState::new(DashboardConfig {
            data_path: file.path().to_path_buf(),
            delimiter: "ab".to_string(),
            ..DashboardConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn image_follows_filter_label() {
        let file = write_rows(ROWS);
        let mut state = state_for(&file);
        assert!(state.image_path().unwrap().ends_with("SDO.jpg"));
        state.set_filter_label("EIT 304");
        assert!(state.image_path().unwrap().ends_with("EIT 304.jpg"));
        state.set_filter_label("unknown");
        assert!(state.image_path().is_none());
    }
}
