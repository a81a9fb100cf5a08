/// Data layer: core types, loading, filtering and derived columns.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table (caller-supplied column names)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  inclusive range on one column → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive  │  rolling_avg / cycle column appended → Table
///   └──────────┘
/// ```

pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::PipelineError;
pub use model::{CellValue, Column, Table};
