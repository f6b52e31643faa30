//! Rows of the language/calibration table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Reserved language key addressing the root of the tree.
pub const ROOT_KEY: &str = "ROOT";

/// Separator between clade members in a language key.
const CLADE_SEPARATOR: char = ',';

/// One row of the language/calibration table.
///
/// `language_key` is a language id, a comma-joined clade, or [`ROOT_KEY`].
/// `nexus_name` is the matrix taxon alias (empty for clades and the root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub language_key: String,
    pub nexus_name: String,
    pub calibration_spec: String,
}

impl LanguageRecord {
    /// Interpret the language key as a calibration target.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLanguageKey`] when the key is blank.
    pub fn target(&self) -> Result<CalibrationTarget, CoreError> {
        CalibrationTarget::parse(&self.language_key)
    }
}

/// What a calibration row applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "languages")]
pub enum CalibrationTarget {
    Root,
    /// Clade members in the order they were written.
    Clade(Vec<String>),
    Language(String),
}

impl CalibrationTarget {
    /// Parse a language-table key.
    ///
    /// Keys containing a comma are clades; members are trimmed and blanks
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLanguageKey`] when the key is blank.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidLanguageKey {
                key: key.to_string(),
                reason: "key is empty".to_string(),
            });
        }

        if key == ROOT_KEY {
            return Ok(Self::Root);
        }

        if key.contains(CLADE_SEPARATOR) {
            let members = key
                .split(CLADE_SEPARATOR)
                .map(str::trim)
                .filter(|member| !member.is_empty())
                .map(String::from)
                .collect();
            return Ok(Self::Clade(members));
        }

        Ok(Self::Language(key.to_string()))
    }
}

impl fmt::Display for CalibrationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Clade(members) => f.write_str(&members.join(", ")),
            Self::Language(id) => f.write_str(id),
        }
    }
}
