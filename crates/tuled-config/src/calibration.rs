//! Calibration age settings.

use serde::{Deserialize, Serialize};

const fn default_reference_year() -> f64 {
    2020.0
}

const fn default_min_age() -> f64 {
    0.1
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CalibrationConfig {
    /// Year that attestation dates are subtracted from.
    #[serde(default = "default_reference_year")]
    pub reference_year: f64,

    /// Ages at or below this value are too recent to calibrate.
    #[serde(default = "default_min_age")]
    pub min_age: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            min_age: default_min_age(),
        }
    }
}
