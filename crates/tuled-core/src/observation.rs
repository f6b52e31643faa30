//! Long-form observation records.

use serde::{Deserialize, Serialize};

/// Sentinel value for a cell whose cognate class is unknown.
pub const UNKNOWN_VALUE: &str = "?";

/// Separator between cognate-class positions in a matrix-derived value.
pub const VALUE_SEPARATOR: &str = "_";

/// One (language, feature) cell produced by an ingestion source.
///
/// `value` is either [`UNKNOWN_VALUE`] or a cognate-class identifier: the
/// `_`-joined bit positions of a matrix row, or an opaque cognate-set id when
/// read from a CLDF directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub language_id: String,
    pub feature_id: String,
    pub value: String,
    pub glottocode: Option<String>,
}

impl Observation {
    /// Build an observation without a glottocode.
    pub fn new(
        language_id: impl Into<String>,
        feature_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            language_id: language_id.into(),
            feature_id: feature_id.into(),
            value: value.into(),
            glottocode: None,
        }
    }

    /// Attach a glottocode. Empty strings are stored as absent.
    #[must_use]
    pub fn with_glottocode(mut self, glottocode: impl Into<String>) -> Self {
        let glottocode = glottocode.into();
        self.glottocode = (!glottocode.is_empty()).then_some(glottocode);
        self
    }

    /// Whether this cell carries the unknown sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.value == UNKNOWN_VALUE
    }
}
