//! # Quality Gate
//!
//! Triage of malformed input before analysis.
//!
//! ## Checks (in precedence order)
//!
//! 1. **Missing values**: `NaN` markers in either channel
//! 2. **Invalid tokens**: the `bad data` sentinel or other non-numeric text
//! 3. **Voltage overflow**: a voltage whose magnitude reaches the safety limit
//! 4. **Blank tokens**: empty cells or cells with embedded whitespace
//!
//! [`QualityGate::classify`] returns the first matching [`Diagnosis`]. Each
//! diagnosis maps to a [`RepairStrategy`]; [`QualityGate::screen`] applies
//! repairs until the recording is clean, or stops on a voltage overflow.
//!
//! ```rust
//! use ecg_analysis::quality::{Diagnosis, QualityGate};
//! use ecg_analysis::signal::RawRecording;
//!
//! let raw = RawRecording::from_rows([("0", "0.1"), ("1", "NaN"), ("2", "0.3")]);
//! let gate = QualityGate::default();
//! assert_eq!(gate.classify(&raw), Diagnosis::NanPresent);
//!
//! let screened = gate.screen(raw)?;
//! assert_eq!(screened.recording.voltage().len(), 3);
//! # Ok::<(), ecg_analysis::quality::QualityError>(())
//! ```

use std::fmt;

use log::{debug, info, log, warn, Level};

use crate::signal::{RawRecording, Recording, Token};

pub use error::QualityError;
pub use repair::{interpolate_missing, RepairStrategy};
pub use report::{CheckStatus, QualityCheck, QualityReport};

mod error;
mod repair;
mod report;

#[cfg(test)]
mod tests;

/// Default voltage magnitude treated as an unsafe physical reading.
///
/// A voltage overflows when `|v| >= limit`. The test is numeric, so `0.300`
/// is a safe reading and `-300` is not.
pub const DEFAULT_VOLTAGE_LIMIT: f64 = 300.0;

/// Outcome of classifying a raw recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    /// Missing-value markers present
    NanPresent,
    /// Non-numeric tokens present
    InvalidToken,
    /// Voltage beyond the safety limit
    VoltageOverflow,
    /// Blank tokens present
    BlankToken,
    /// No defect found
    None,
}

impl Diagnosis {
    /// Log level used when the diagnosis is raised
    pub fn severity(&self) -> Level {
        match self {
            Diagnosis::VoltageOverflow => Level::Warn,
            Diagnosis::None => Level::Info,
            _ => Level::Error,
        }
    }

    /// True when the run cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(self, Diagnosis::VoltageOverflow)
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Diagnosis::NanPresent => "missing values",
            Diagnosis::InvalidToken => "invalid tokens",
            Diagnosis::VoltageOverflow => "voltage overflow",
            Diagnosis::BlankToken => "blank tokens",
            Diagnosis::None => "clean",
        };
        f.write_str(label)
    }
}

/// Per-class defect counts for one raw recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefectCounts {
    /// Cells holding the missing-value marker
    pub missing: usize,
    /// Cells holding non-numeric text
    pub invalid: usize,
    /// Voltage samples at or beyond the limit
    pub overflow: usize,
    /// Blank cells
    pub blank: usize,
}

impl DefectCounts {
    /// First matching diagnosis in precedence order
    pub fn diagnosis(&self) -> Diagnosis {
        if self.missing > 0 {
            Diagnosis::NanPresent
        } else if self.invalid > 0 {
            Diagnosis::InvalidToken
        } else if self.overflow > 0 {
            Diagnosis::VoltageOverflow
        } else if self.blank > 0 {
            Diagnosis::BlankToken
        } else {
            Diagnosis::None
        }
    }

    /// Cells counted for one diagnosis; zero for [`Diagnosis::None`]
    pub fn count_of(&self, diagnosis: Diagnosis) -> usize {
        match diagnosis {
            Diagnosis::NanPresent => self.missing,
            Diagnosis::InvalidToken => self.invalid,
            Diagnosis::VoltageOverflow => self.overflow,
            Diagnosis::BlankToken => self.blank,
            Diagnosis::None => 0,
        }
    }
}

/// Result of screening a raw recording
#[derive(Debug, Clone)]
pub struct Screened {
    /// Clean numeric recording
    pub recording: Recording,
    /// Diagnoses repaired, in the order they were handled
    pub repairs: Vec<Diagnosis>,
}

/// Classifies raw recordings and repairs recoverable defects
#[derive(Debug, Clone, Copy)]
pub struct QualityGate {
    voltage_limit: f64,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self { voltage_limit: DEFAULT_VOLTAGE_LIMIT }
    }
}

impl QualityGate {
    /// Create a gate with the given voltage safety limit, which must be finite
    /// and positive.
    pub fn new(voltage_limit: f64) -> Result<Self, QualityError> {
        if !voltage_limit.is_finite() || voltage_limit <= 0.0 {
            return Err(QualityError::InvalidVoltageLimit(voltage_limit));
        }
        Ok(Self { voltage_limit })
    }

    /// Voltage magnitude treated as overflow
    pub fn voltage_limit(&self) -> f64 {
        self.voltage_limit
    }

    fn overflows(&self, token: &Token) -> bool {
        token.value().is_some_and(|v| v.abs() >= self.voltage_limit)
    }

    /// Count defects of every class
    pub fn count_defects(&self, raw: &RawRecording) -> DefectCounts {
        let mut counts = DefectCounts::default();
        for (t, v) in raw.rows() {
            for token in [t, v] {
                match token {
                    Token::Missing => counts.missing += 1,
                    Token::Invalid(_) => counts.invalid += 1,
                    Token::Blank => counts.blank += 1,
                    Token::Valid(_) => {}
                }
            }
            if self.overflows(v) {
                counts.overflow += 1;
            }
        }
        counts
    }

    /// Classify a raw recording; the first matching check wins
    pub fn classify(&self, raw: &RawRecording) -> Diagnosis {
        self.count_defects(raw).diagnosis()
    }

    /// Count every defect class into a report without repairing anything
    pub fn inspect(&self, raw: &RawRecording, source: impl Into<String>) -> QualityReport {
        QualityReport::new(source, raw.len(), self.count_defects(raw), self.voltage_limit)
    }

    /// Classify and repair until the recording is clean.
    ///
    /// Returns [`QualityError::VoltageOverflow`] as soon as an unsafe voltage is
    /// diagnosed; no further repair is attempted.
    pub fn screen(&self, mut raw: RawRecording) -> Result<Screened, QualityError> {
        let mut repairs = Vec::new();

        loop {
            let diagnosis = self.classify(&raw);
            let strategy = RepairStrategy::for_diagnosis(diagnosis);

            if diagnosis != Diagnosis::None {
                log!(diagnosis.severity(), "Signal has {}, strategy {:?}", diagnosis, strategy);
            }

            match strategy {
                RepairStrategy::Convert => break,
                RepairStrategy::Halt => {
                    let (index, value) = raw
                        .voltage
                        .iter()
                        .enumerate()
                        .find_map(|(i, token)| {
                            token.value().filter(|v| v.abs() >= self.voltage_limit).map(|v| (i, v))
                        })
                        .unwrap_or((0, f64::NAN));
                    warn!("VOLTAGE TOO HIGH! SYSTEM OFF! ({} at row {})", value, index);
                    return Err(QualityError::VoltageOverflow {
                        index,
                        value,
                        limit: self.voltage_limit,
                    });
                }
                _ => {
                    let before = raw.len();
                    raw = strategy.apply(raw)?;
                    debug!("{:?}: {} -> {} rows", strategy, before, raw.len());
                    repairs.push(diagnosis);
                }
            }
        }

        let recording = raw.into_recording()?;
        info!("Quality gate passed: {} samples, {} repairs", recording.len(), repairs.len());

        Ok(Screened { recording, repairs })
    }
}
