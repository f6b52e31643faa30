//! Coverage filter thresholds.

use serde::{Deserialize, Serialize};

const fn default_ratio_threshold() -> f64 {
    0.5
}

const fn default_coverage_threshold() -> f64 {
    0.7
}

/// Thresholds for the two coverage passes. Both are strict lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Minimum share of features a language must cover.
    #[serde(default = "default_ratio_threshold")]
    pub ratio_threshold: f64,

    /// Minimum coverage of a feature relative to the best-covered feature.
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: default_ratio_threshold(),
            coverage_threshold: default_coverage_threshold(),
        }
    }
}
