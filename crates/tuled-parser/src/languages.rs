//! The language/calibration table.
//!
//! One row per language, clade, or the root, with the matrix taxon alias used
//! by NEXUS runs and a free-text calibration spec.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tuled_core::LanguageRecord;

use crate::error::ParserError;
use crate::table::{read_rows, read_rows_from};

const TABLE: &str = "languages";
const REQUIRED_COLUMNS: &[&str] = &["Language", "Nexus_Name", "Calibration"];

#[derive(Debug, Deserialize)]
struct LanguageTableRow {
    #[serde(rename = "Language")]
    language: String,
    #[serde(rename = "Nexus_Name", default)]
    nexus_name: String,
    #[serde(rename = "Calibration", default)]
    calibration: String,
}

impl From<LanguageTableRow> for LanguageRecord {
    fn from(row: LanguageTableRow) -> Self {
        Self {
            language_key: row.language.trim().to_string(),
            nexus_name: row.nexus_name.trim().to_string(),
            calibration_spec: row.calibration.trim().to_string(),
        }
    }
}

/// Immutable, validated language table in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    records: Vec<LanguageRecord>,
}

impl LanguageTable {
    /// Load the table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Open`], [`ParserError::Csv`] or
    /// [`ParserError::MissingColumn`] when the file cannot be read, and any
    /// error from [`Self::from_records`].
    pub fn load(path: &Path) -> Result<Self, ParserError> {
        let rows = read_rows::<LanguageTableRow>(path, TABLE, REQUIRED_COLUMNS)?;
        let table = Self::from_records(rows.into_iter().map(LanguageRecord::from).collect())?;
        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            "read language data"
        );
        Ok(table)
    }

    /// Load the table from any CSV reader.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], minus [`ParserError::Open`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParserError> {
        let rows = read_rows_from::<_, LanguageTableRow>(reader, TABLE, REQUIRED_COLUMNS)?;
        Self::from_records(rows.into_iter().map(LanguageRecord::from).collect())
    }

    /// Build a table from records, checking every key.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Core`] for a blank language key and
    /// [`ParserError::DuplicateKey`] when two rows share a key.
    pub fn from_records(records: Vec<LanguageRecord>) -> Result<Self, ParserError> {
        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                record.target()?;
                if !seen.insert(record.language_key.as_str()) {
                    return Err(ParserError::DuplicateKey {
                        table: TABLE.to_string(),
                        key: record.language_key.clone(),
                    });
                }
            }
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[LanguageRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matrix taxon name -> language key, for rows that declare a taxon alias.
    #[must_use]
    pub fn taxon_map(&self) -> HashMap<String, String> {
        self.records
            .iter()
            .filter(|record| !record.nexus_name.is_empty())
            .map(|record| (record.nexus_name.clone(), record.language_key.clone()))
            .collect()
    }
}
