use crate::signal::{RawRecording, Token};

use super::{Diagnosis, QualityError};

/// Repair applied for each diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// Linearly interpolate missing samples in index space
    Interpolate,
    /// Drop rows holding invalid tokens
    DropInvalid,
    /// Drop rows holding blank tokens
    DropBlank,
    /// Unsafe reading: stop the run
    Halt,
    /// Nothing to repair
    Convert,
}

impl RepairStrategy {
    /// Strategy table keyed by diagnosis
    pub fn for_diagnosis(diagnosis: Diagnosis) -> Self {
        match diagnosis {
            Diagnosis::NanPresent => RepairStrategy::Interpolate,
            Diagnosis::InvalidToken => RepairStrategy::DropInvalid,
            Diagnosis::BlankToken => RepairStrategy::DropBlank,
            Diagnosis::VoltageOverflow => RepairStrategy::Halt,
            Diagnosis::None => RepairStrategy::Convert,
        }
    }

    /// Apply the strategy to a raw recording.
    ///
    /// `Halt` and `Convert` leave the recording untouched; the gate decides what
    /// to do with them.
    pub fn apply(self, raw: RawRecording) -> Result<RawRecording, QualityError> {
        match self {
            RepairStrategy::Interpolate => {
                let time = interpolate_missing("time", raw.time)?;
                let voltage = interpolate_missing("voltage", raw.voltage)?;
                Ok(RawRecording::new(time, voltage)?)
            }
            RepairStrategy::DropInvalid => {
                Ok(raw.retain_rows(|t, v| !t.is_invalid() && !v.is_invalid()))
            }
            RepairStrategy::DropBlank => Ok(raw.retain_rows(|t, v| !t.is_blank() && !v.is_blank())),
            RepairStrategy::Halt | RepairStrategy::Convert => Ok(raw),
        }
    }
}

/// Replace missing tokens by linear interpolation between the surrounding
/// valid samples, using row indices as the abscissa.
///
/// Rows before the first or after the last valid sample take that sample's
/// value. Invalid and blank tokens are neither anchors nor filled.
pub fn interpolate_missing(
    axis: &'static str,
    tokens: Vec<Token>,
) -> Result<Vec<Token>, QualityError> {
    if !tokens.iter().any(Token::is_missing) {
        return Ok(tokens);
    }

    let anchors: Vec<(usize, f64)> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| token.value().map(|v| (i, v)))
        .collect();

    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(QualityError::NoValidSamples { axis }),
    };

    let filled = tokens
        .into_iter()
        .enumerate()
        .map(|(i, token)| {
            if !token.is_missing() {
                return token;
            }
            let next = anchors.partition_point(|&(j, _)| j < i);
            let value = if next == 0 {
                first.1
            } else if next == anchors.len() {
                last.1
            } else {
                let (x0, y0) = anchors[next - 1];
                let (x1, y1) = anchors[next];
                let slope = (y1 - y0) / (x1 - x0) as f64;
                y0 + slope * (i - x0) as f64
            };
            Token::Valid(value)
        })
        .collect();

    Ok(filled)
}
