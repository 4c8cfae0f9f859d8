/// Errors that can occur while writing a summary
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Temporary file could not be moved into place
    #[error("Failed to persist report: {0}")]
    PersistError(#[from] tempfile::PersistError),
}
