//! Source-format selection.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File suffix that selects the matrix parser.
const NEXUS_SUFFIX: &str = ".nex";

/// Which ingestion path handles a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A NEXUS character matrix.
    Nexus,
    /// A CLDF directory of relational tables.
    Cldf,
}

impl SourceKind {
    /// Select the ingestion path from the source path alone.
    ///
    /// Only the `.nex` suffix is checked; anything else is read as a CLDF
    /// directory without further verification.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(NEXUS_SUFFIX) {
            Self::Nexus
        } else {
            Self::Cldf
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nexus => "nexus",
            Self::Cldf => "cldf",
        }
    }
}
