use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadOptions;
use crate::imagery::SolarFilter;
use crate::pipeline::DataSource;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "SUNDASH_CONFIG";

// ---------------------------------------------------------------------------
// Slider settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingSettings {
    pub min: usize,
    pub max: usize,
    pub initial: usize,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            min: 1,
            max: 24,
            initial: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            min: 9.0,
            max: 13.0,
            step: 0.1,
            initial: 11.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard needs to know up front. Passed explicitly into
/// [`DashboardState`](crate::state::DashboardState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backing observation file (headerless CSV or Parquet).
    pub data_path: PathBuf,
    /// Directory holding the solar imagery.
    pub assets_dir: PathBuf,
    /// Single-character CSV delimiter.
    pub delimiter: String,
    /// `total_spot_num` value treated as missing.
    pub missing_sentinel: Option<f64>,
    /// Years selectable in the range controls.
    pub year_bounds: (i64, i64),
    /// Starting year range; the full bounds when absent.
    pub initial_years: Option<(i64, i64)>,
    pub smoothing_months: SmoothingSettings,
    pub cycle_years: CycleSettings,
    pub initial_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("SN_m_tot_V2.0.csv"),
            assets_dir: PathBuf::from("assets"),
            delimiter: ",".to_string(),
            missing_sentinel: None,
            year_bounds: (1749, 2022),
            initial_years: None,
            smoothing_months: SmoothingSettings::default(),
            cycle_years: CycleSettings::default(),
            initial_filter: SolarFilter::HmiContinuum.label().to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve from the first CLI argument, then [`CONFIG_ENV`], then defaults.
    pub fn resolve(cli_arg: Option<String>) -> Result<Self> {
        let path = cli_arg.or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(p) => {
                log::info!("using configuration {p}");
                Self::load(Path::new(&p))
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the controls could not honour.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = self.year_bounds;
        ensure!(low <= high, "year_bounds are inverted: {low} > {high}");
        if let Some((a, b)) = self.initial_years {
            ensure!(a <= b, "initial_years are inverted: {a} > {b}");
        }

        let s = &self.smoothing_months;
        ensure!(s.min >= 1, "smoothing_months.min must be at least 1");
        ensure!(s.min <= s.max, "smoothing_months bounds are inverted");

        let c = &self.cycle_years;
        ensure!(
            c.min.is_finite() && c.min > 0.0,
            "cycle_years.min must be a positive number"
        );
        ensure!(c.min <= c.max, "cycle_years bounds are inverted");
        ensure!(
            c.step.is_finite() && c.step > 0.0,
            "cycle_years.step must be a positive number"
        );

        self.delimiter_byte()?;
        Ok(())
    }

    fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter),
        }
    }

    /// Starting year range, clamped to the bounds.
    pub fn initial_year_range(&self) -> (i64, i64) {
        let (min, max) = self.year_bounds;
        let (a, b) = self.initial_years.unwrap_or(self.year_bounds);
        (a.clamp(min, max), b.clamp(min, max))
    }

    /// Data source for the pipeline; fails on a malformed delimiter.
    pub fn data_source(&self) -> Result<DataSource> {
        let mut source = DataSource::new(self.data_path.clone());
        source.options = LoadOptions {
            delimiter: self.delimiter_byte()?,
        };
        source.missing_sentinel = self.missing_sentinel;
        Ok(source)
    }
}
