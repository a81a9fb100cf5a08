use thiserror::Error;

/// Failure kinds of the data preparation pipeline. Every stage either
/// returns a complete table or one of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not be read or does not have a rectangular shape.
    #[error("data unavailable from {location}: {reason}")]
    DataUnavailable { location: String, reason: String },

    /// The number of supplied column names differs from the data.
    #[error("schema mismatch: {expected} column names supplied but the data has {found} columns")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("column not found: '{0}'")]
    ColumnNotFound(String),

    #[error("invalid rolling window: {0} (must be at least 1)")]
    InvalidWindow(usize),

    #[error("invalid cycle length: {0} (must be a positive finite number)")]
    InvalidCycleLength(f64),
}

impl PipelineError {
    pub(crate) fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        PipelineError::DataUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
