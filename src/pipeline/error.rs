use crate::detect::DetectError;
use crate::filter::FilterError;
use crate::metrics::MetricsError;
use crate::quality::QualityError;
use crate::signal::SignalError;

/// Errors that can occur while analyzing a recording
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Loading or converting the recording failed
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    /// The quality gate rejected the recording
    #[error("Quality error: {0}")]
    Quality(#[from] QualityError),

    /// Filter design failed
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Beat detection failed
    #[error("Detection error: {0}")]
    Detect(#[from] DetectError),

    /// Metrics could not be computed
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

impl AnalysisError {
    /// True when the run stopped on an unsafe voltage
    pub fn is_safety_halt(&self) -> bool {
        matches!(self, AnalysisError::Quality(QualityError::VoltageOverflow { .. }))
    }
}
