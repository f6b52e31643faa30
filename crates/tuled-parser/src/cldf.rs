//! CLDF directory reading.
//!
//! Joins `cognates.csv` -> `forms.csv` -> (`languages.csv`, `parameters.csv`)
//! and yields one [`Observation`] per cognate judgment, in cognate-table order.
//! The tables are read as plain CSV; only the columns listed below are
//! required, and nothing else about the dataset is validated.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use tuled_core::Observation;

use crate::error::ParserError;
use crate::table::{index_by_key, read_rows};

pub const LANGUAGES_TABLE: &str = "languages.csv";
pub const PARAMETERS_TABLE: &str = "parameters.csv";
pub const FORMS_TABLE: &str = "forms.csv";
pub const COGNATES_TABLE: &str = "cognates.csv";

#[derive(Debug, Deserialize)]
struct LanguageRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Glottocode", default)]
    glottocode: String,
}

#[derive(Debug, Deserialize)]
struct ParameterRow {
    #[serde(rename = "ID")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct FormRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Language_ID")]
    language_id: String,
    #[serde(rename = "Parameter_ID")]
    parameter_id: String,
}

#[derive(Debug, Deserialize)]
struct CognateRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Form_ID")]
    form_id: String,
    #[serde(rename = "Cognateset_ID")]
    cognateset_id: String,
}

/// Reader over a CLDF directory.
#[derive(Debug, Clone)]
pub struct CldfReader {
    dir: PathBuf,
}

impl CldfReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read and join the four tables.
    ///
    /// # Errors
    ///
    /// - [`ParserError::Open`] / [`ParserError::Csv`] when a table cannot be read
    /// - [`ParserError::MissingColumn`] when a required column is absent
    /// - [`ParserError::DuplicateKey`] when a keyed table repeats an `ID`
    /// - [`ParserError::UnresolvedReference`] when a foreign key has no target row
    pub fn read(&self) -> Result<Vec<Observation>, ParserError> {
        tracing::info!(dir = %self.dir.display(), "loading CLDF data");

        let languages = index_by_key(
            read_rows::<LanguageRow>(
                &self.dir.join(LANGUAGES_TABLE),
                LANGUAGES_TABLE,
                &["ID", "Glottocode"],
            )?,
            LANGUAGES_TABLE,
            |row| row.id.as_str(),
        )?;
        let parameters = index_by_key(
            read_rows::<ParameterRow>(&self.dir.join(PARAMETERS_TABLE), PARAMETERS_TABLE, &["ID"])?,
            PARAMETERS_TABLE,
            |row| row.id.as_str(),
        )?;
        let forms = index_by_key(
            read_rows::<FormRow>(
                &self.dir.join(FORMS_TABLE),
                FORMS_TABLE,
                &["ID", "Language_ID", "Parameter_ID"],
            )?,
            FORMS_TABLE,
            |row| row.id.as_str(),
        )?;
        let cognates = read_rows::<CognateRow>(
            &self.dir.join(COGNATES_TABLE),
            COGNATES_TABLE,
            &["ID", "Form_ID", "Cognateset_ID"],
        )?;
        if let Some(duplicate) = first_duplicate_id(&cognates) {
            return Err(ParserError::DuplicateKey {
                table: COGNATES_TABLE.to_string(),
                key: duplicate.to_string(),
            });
        }

        tracing::debug!(
            languages = languages.len(),
            parameters = parameters.len(),
            forms = forms.len(),
            cognates = cognates.len(),
            "loaded CLDF tables"
        );

        cognates
            .into_iter()
            .map(|cognate| {
                let form = forms.get(&cognate.form_id).ok_or_else(|| {
                    unresolved(COGNATES_TABLE, &cognate.id, "Form_ID", &cognate.form_id, FORMS_TABLE)
                })?;
                let language = languages.get(&form.language_id).ok_or_else(|| {
                    unresolved(FORMS_TABLE, &form.id, "Language_ID", &form.language_id, LANGUAGES_TABLE)
                })?;
                if !parameters.contains_key(&form.parameter_id) {
                    return Err(unresolved(
                        FORMS_TABLE,
                        &form.id,
                        "Parameter_ID",
                        &form.parameter_id,
                        PARAMETERS_TABLE,
                    ));
                }

                Ok(Observation::new(
                    language.id.as_str(),
                    form.parameter_id.as_str(),
                    cognate.cognateset_id,
                )
                .with_glottocode(language.glottocode.as_str()))
            })
            .collect()
    }
}

/// Cognates are never looked up by key, but a repeated `ID` still marks a
/// corrupt table.
fn first_duplicate_id(rows: &[CognateRow]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| row.id.as_str())
        .find(|id| !seen.insert(*id))
}

fn unresolved(table: &str, row_id: &str, column: &str, key: &str, target_table: &str) -> ParserError {
    ParserError::UnresolvedReference {
        table: table.to_string(),
        row_id: row_id.to_string(),
        column: column.to_string(),
        key: key.to_string(),
        target_table: target_table.to_string(),
    }
}
