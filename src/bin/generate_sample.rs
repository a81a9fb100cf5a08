//! Write a synthetic monthly sunspot series in the dashboard's input layout.
//!
//! Usage: `generate_sample [OUTPUT]` (default `SN_m_tot_V2.0.csv`). Paths
//! ending in `.parquet` or `.pq` are written as Parquet instead of CSV.

use std::f64::consts::PI;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use sundash::data::model::OBSERVATION_COLUMNS;

const FIRST_YEAR: i64 = 1749;
const LAST_YEAR: i64 = 2022;
const CYCLE_YEARS: f64 = 11.0;
/// Months at the end of the series flagged as provisional.
const PROVISIONAL_MONTHS: usize = 6;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic monthly observation.
struct Observation {
    year: i64,
    month: i64,
    date_frac: f64,
    total_spot_num: f64,
    st_dev: f64,
    observation: i64,
    marker: i64,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Observation> {
    let n_months = ((LAST_YEAR - FIRST_YEAR + 1) * 12) as usize;
    let mut rows = Vec::with_capacity(n_months);

    for i in 0..n_months {
        let year = FIRST_YEAR + (i / 12) as i64;
        let month = (i % 12) as i64 + 1;
        // Middle of the month, as in the SILSO files.
        let date_frac = year as f64 + (month as f64 - 0.5) / 12.0;

        // Cycle amplitude drifts slowly so consecutive maxima differ.
        let amplitude = 90.0 + 40.0 * (2.0 * PI * (date_frac - FIRST_YEAR as f64) / 97.0).sin();
        let phase = 2.0 * PI * (date_frac - 1755.2) / CYCLE_YEARS;
        let mean = amplitude * (1.0 - phase.cos());
        let total_spot_num = round1(rng.gauss(mean, 0.15 * mean + 3.0).max(0.0));

        // Observer counts were only recorded from 1818 onwards.
        let (st_dev, observation) = if year < 1818 {
            (-1.0, -1)
        } else {
            (
                round1(0.08 * total_spot_num + 1.5),
                (rng.next_f64() * 1200.0) as i64 + 30,
            )
        };
        let marker = if i + PROVISIONAL_MONTHS >= n_months { 0 } else { 1 };

        rows.push(Observation {
            year,
            month,
            date_frac: (date_frac * 1000.0).round() / 1000.0,
            total_spot_num,
            st_dev,
            observation,
            marker,
        });
    }
    rows
}

fn write_csv(path: &Path, rows: &[Observation]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for r in rows {
        writer.write_record(&[
            r.year.to_string(),
            r.month.to_string(),
            format!("{:.3}", r.date_frac),
            format!("{:.1}", r.total_spot_num),
            format!("{:.1}", r.st_dev),
            r.observation.to_string(),
            r.marker.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Observation]) -> Result<()> {
    let int_col = |f: fn(&Observation) -> i64| Int64Array::from(rows.iter().map(f).collect::<Vec<_>>());
    let float_col = |f: fn(&Observation) -> f64| Float64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let types = [
        DataType::Int64,
        DataType::Int64,
        DataType::Float64,
        DataType::Float64,
        DataType::Float64,
        DataType::Int64,
        DataType::Int64,
    ];
    let schema = Arc::new(Schema::new(
        OBSERVATION_COLUMNS
            .iter()
            .zip(types)
            .map(|(name, ty)| Field::new(*name, ty, false))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(int_col(|r: &Observation| r.year)),
            Arc::new(int_col(|r: &Observation| r.month)),
            Arc::new(float_col(|r: &Observation| r.date_frac)),
            Arc::new(float_col(|r: &Observation| r.total_spot_num)),
            Arc::new(float_col(|r: &Observation| r.st_dev)),
            Arc::new(int_col(|r: &Observation| r.observation)),
            Arc::new(int_col(|r: &Observation| r.marker)),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Same extensions the dashboard loader reads as Parquet.
fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "parquet" | "pq"))
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SN_m_tot_V2.0.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    if is_parquet(path) {
        write_parquet(path, &rows)?;
    } else {
        write_csv(path, &rows)?;
    }

    println!(
        "Wrote {} monthly observations ({FIRST_YEAR}–{LAST_YEAR}) to {output}",
        rows.len()
    );
    Ok(())
}
