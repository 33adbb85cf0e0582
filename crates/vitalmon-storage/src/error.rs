/// Reasons an ingestion tuple is rejected before it reaches the store.
///
/// # Examples
///
/// ```rust
/// use vitalmon_storage::error::IngestError;
///
/// let err = IngestError::FieldCount { expected: 4, found: 2 };
/// assert!(err.to_string().contains("expected 4"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// The line does not split into the expected number of fields.
    #[error("Ingest: expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A numeric field could not be parsed.
    #[error("Ingest: invalid {field} '{raw}'")]
    InvalidNumber { field: &'static str, raw: String },

    /// The value parsed but is NaN or infinite.
    #[error("Ingest: non-finite value '{0}'")]
    NonFinite(String),

    /// The label does not name a known record kind.
    #[error("Ingest: {0}")]
    UnknownKind(String),
}

/// Convenience `Result` alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
