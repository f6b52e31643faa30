//! Resolved calibration constraints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::CalibrationTarget;

/// A dated or expression-valued hint attached to a language, clade, or the root.
///
/// Clade targets are stored with their members sorted, so the rendered line is
/// stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationConstraint {
    pub target: CalibrationTarget,
    pub value: String,
}

impl fmt::Display for CalibrationConstraint {
    /// Render as a calibration-file line: `root = 2.5-3.5`, `A, B = 120.000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}
