use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Error type returned when an accepted upload cannot be decoded.
///
/// User-input problems (missing file, oversize, bad extension, unrecognized content) are never
/// reported through this type; they are values of [`crate::types::ValidationOutcome`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Delimited-text decode error (reader I/O failure, malformed stream, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet container decode error (feature-gated behind `excel`).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// Failure reported by an injected [`crate::extraction::SpreadsheetCodec`].
    #[error("spreadsheet error: {message}")]
    Spreadsheet { message: String },

    /// The requested decode path is not available in this build.
    #[error("unsupported: {message}")]
    Unsupported { message: String },
}
