//! Matrix parser settings.
//!
//! Nothing is excluded by default. TuLeD releases carry `Apiaká` in the
//! matrix without a language-table mapping; to skip it, set
//!
//! ```toml
//! # .tuled/config.toml
//! [nexus]
//! excluded_taxa = ["Apiaká"]
//! ```
//!
//! or pass `--exclude Apiaká`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NexusConfig {
    /// Matrix taxa skipped entirely while their data is being cleaned.
    #[serde(default)]
    pub excluded_taxa: Vec<String>,
}
