use std::fmt;

use super::{DefectCounts, Diagnosis, RepairStrategy};

/// Defect classes reported, in precedence order
const CHECKED: [Diagnosis; 4] = [
    Diagnosis::NanPresent,
    Diagnosis::InvalidToken,
    Diagnosis::VoltageOverflow,
    Diagnosis::BlankToken,
];

/// How a defect class affects the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// No cells of this class
    Clean,
    /// Present, and the planned repair recovers the recording
    Repairable,
    /// Present, and the run halts
    Fatal,
}

/// One defect class with its count and planned repair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityCheck {
    /// Defect class checked
    pub diagnosis: Diagnosis,
    /// Affected cells (voltage samples for overflow)
    pub count: usize,
    /// Repair the gate applies when the class is present
    pub strategy: RepairStrategy,
}

impl QualityCheck {
    /// Check for `diagnosis`, counted from `counts`
    pub fn from_counts(diagnosis: Diagnosis, counts: &DefectCounts) -> Self {
        Self {
            diagnosis,
            count: counts.count_of(diagnosis),
            strategy: RepairStrategy::for_diagnosis(diagnosis),
        }
    }

    /// Status derived from the count and the diagnosis
    pub fn status(&self) -> CheckStatus {
        if self.count == 0 {
            CheckStatus::Clean
        } else if self.diagnosis.is_fatal() {
            CheckStatus::Fatal
        } else {
            CheckStatus::Repairable
        }
    }

    fn detail(&self, voltage_limit: f64) -> String {
        let unit = if self.diagnosis == Diagnosis::VoltageOverflow { "sample" } else { "cell" };
        let plural = if self.count == 1 { "" } else { "s" };
        let action = match self.strategy {
            RepairStrategy::Interpolate => "interpolate".to_string(),
            RepairStrategy::DropInvalid | RepairStrategy::DropBlank => "drop rows".to_string(),
            RepairStrategy::Halt => format!("halt, |v| >= {}", voltage_limit),
            RepairStrategy::Convert => "none".to_string(),
        };
        format!("{} {}{}, {}", self.count, unit, plural, action)
    }
}

/// Pre-analysis quality report for one raw recording
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Where the recording came from
    pub source: String,
    /// Rows in the raw recording
    pub rows: usize,
    /// Defect counts per class
    pub counts: DefectCounts,
    /// Voltage magnitude treated as overflow
    pub voltage_limit: f64,
    /// One check per defect class, in precedence order
    pub checks: Vec<QualityCheck>,
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Warn,
    Bad,
    Heading,
}

impl QualityReport {
    /// Build the report from counted defects
    pub fn new(source: impl Into<String>, rows: usize, counts: DefectCounts, voltage_limit: f64) -> Self {
        Self {
            source: source.into(),
            rows,
            counts,
            voltage_limit,
            checks: CHECKED.iter().map(|&d| QualityCheck::from_counts(d, &counts)).collect(),
        }
    }

    /// Diagnosis the gate will act on first
    pub fn diagnosis(&self) -> Diagnosis {
        self.counts.diagnosis()
    }

    /// True when the recording cannot be analyzed
    pub fn has_failures(&self) -> bool {
        self.rows == 0 || self.fatal_count() > 0
    }

    /// Repairs the gate will run, in order, if nothing is fatal
    pub fn planned_repairs(&self) -> Vec<RepairStrategy> {
        self.checks
            .iter()
            .filter(|c| c.status() == CheckStatus::Repairable)
            .map(|c| c.strategy)
            .collect()
    }

    fn count_status(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status() == status).count()
    }

    /// Defect classes with no cells
    pub fn clean_count(&self) -> usize {
        self.count_status(CheckStatus::Clean)
    }

    /// Defect classes the gate repairs
    pub fn repairable_count(&self) -> usize {
        self.count_status(CheckStatus::Repairable)
    }

    /// Defect classes that halt the run
    pub fn fatal_count(&self) -> usize {
        self.count_status(CheckStatus::Fatal)
    }

    fn verdict(&self) -> &'static str {
        if self.rows == 0 {
            "No samples, nothing to analyze"
        } else if self.fatal_count() > 0 {
            "Signal UNSAFE, analysis will halt"
        } else if self.repairable_count() > 0 {
            "Signal usable after repair"
        } else {
            "Signal clean"
        }
    }

    fn render(&self, paint: impl Fn(&str, Tone) -> String) -> String {
        let mut out = paint(&format!("Signal quality: {} ({} rows)", self.source, self.rows), Tone::Heading);
        out.push('\n');

        for check in &self.checks {
            let (marker, tone) = match check.status() {
                CheckStatus::Clean => ("ok  ", Tone::Good),
                CheckStatus::Repairable => ("fix ", Tone::Warn),
                CheckStatus::Fatal => ("HALT", Tone::Bad),
            };
            let line = match check.status() {
                CheckStatus::Clean => format!("[{}] {}", marker, check.diagnosis),
                _ => format!("[{}] {}: {}", marker, check.diagnosis, check.detail(self.voltage_limit)),
            };
            out.push_str("  ");
            out.push_str(&paint(&line, tone));
            out.push('\n');
        }

        let tone = if self.has_failures() {
            Tone::Bad
        } else if self.repairable_count() > 0 {
            Tone::Warn
        } else {
            Tone::Good
        };
        out.push_str(&paint(self.verdict(), tone));
        out.push_str(&format!(
            " ({} clean, {} repairable, {} fatal)",
            self.clean_count(),
            self.repairable_count(),
            self.fatal_count()
        ));
        out
    }

    /// Format the report with terminal colors when `colorized_output` is enabled
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::style;

            self.render(|text, tone| match tone {
                Tone::Good => style(text).green().to_string(),
                Tone::Warn => style(text).yellow().to_string(),
                Tone::Bad => style(text).red().bold().to_string(),
                Tone::Heading => style(text).bold().to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|text, _| text.to_string()))
    }
}
