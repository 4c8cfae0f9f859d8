use serde::{Deserialize, Serialize};

use crate::detect::DetectionConfig;
use crate::filter::BandpassDesign;
use crate::quality::DEFAULT_VOLTAGE_LIMIT;

/// Nominal acquisition rate (Hz)
pub const DEFAULT_SAMPLE_RATE: f64 = 360.0;

/// Lower passband edge (Hz)
pub const DEFAULT_LOW_CUT_HZ: f64 = 10.0;

/// Upper passband edge (Hz)
pub const DEFAULT_HIGH_CUT_HZ: f64 = 60.0;

/// Order of the filter applied before detection
pub const DEFAULT_FILTER_ORDER: usize = 6;

/// Orders designed for diagnostics only
pub const DIAGNOSTIC_ORDERS: [usize; 3] = [3, 6, 9];

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sample rate (Hz)
    pub sample_rate: f64,

    /// Lower passband edge (Hz)
    pub low_cut_hz: f64,

    /// Upper passband edge (Hz)
    pub high_cut_hz: f64,

    /// Order of the applied bandpass
    pub filter_order: usize,

    /// Orders designed and logged at debug level, never applied
    pub diagnostic_orders: Vec<usize>,

    /// Voltage magnitude treated as unsafe
    pub voltage_limit: f64,

    /// Regime table thresholds
    pub detection: DetectionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            low_cut_hz: DEFAULT_LOW_CUT_HZ,
            high_cut_hz: DEFAULT_HIGH_CUT_HZ,
            filter_order: DEFAULT_FILTER_ORDER,
            diagnostic_orders: DIAGNOSTIC_ORDERS.to_vec(),
            voltage_limit: DEFAULT_VOLTAGE_LIMIT,
            detection: DetectionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Bandpass applied before detection
    pub fn bandpass(&self) -> BandpassDesign {
        self.bandpass_of_order(self.filter_order)
    }

    /// Same passband at a different order
    pub fn bandpass_of_order(&self, order: usize) -> BandpassDesign {
        BandpassDesign::new(order, self.low_cut_hz, self.high_cut_hz, self.sample_rate)
    }
}
