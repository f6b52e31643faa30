//! Feature-id normalization and the long-form CSV writer.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tuled_core::{Observation, UNKNOWN_VALUE, VALUE_SEPARATOR};

/// Mode given to newly created output files.
#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

/// Separator between the normalized feature id and its cognate class.
pub const FEATURE_VALUE_SEPARATOR: &str = "__";

/// One row of the observation table, as the model builder reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Glottocode")]
    pub glottocode: Option<String>,
    #[serde(rename = "Feature_ID")]
    pub feature_id: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Normalize a feature id for the model builder.
///
/// Transliterates to ASCII, uppercases, keeps the text before the first `/`,
/// strips `(`, `)` and `,`, and replaces spaces with `_`.
///
/// ```
/// use tuled_pipeline::output::normalize_feature_id;
///
/// assert_eq!(normalize_feature_id("água (fresh) / rio"), "AGUA_FRESH");
/// ```
#[must_use]
pub fn normalize_feature_id(feature_id: &str) -> String {
    let ascii = deunicode::deunicode(feature_id).to_uppercase();
    let head = ascii.split('/').next().unwrap_or_default().trim();
    head.chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Convert observations to output rows, one per (language, normalized feature).
///
/// Rows keep first-seen order. Known values of merged rows are deduplicated
/// and joined with `_`; a merged row is unknown only when all of its values
/// are unknown. The first non-empty glottocode wins.
#[must_use]
pub fn format_observations(observations: &[Observation]) -> Vec<OutputRow> {
    struct Pending<'a> {
        language_id: &'a str,
        glottocode: Option<&'a str>,
        feature_id: String,
        values: Vec<&'a str>,
    }

    let mut order: Vec<Pending<'_>> = Vec::new();
    let mut index: HashMap<(&str, String), usize> = HashMap::new();

    for obs in observations {
        let feature_id = normalize_feature_id(&obs.feature_id);
        let slot = *index
            .entry((obs.language_id.as_str(), feature_id.clone()))
            .or_insert_with(|| {
                order.push(Pending {
                    language_id: &obs.language_id,
                    glottocode: None,
                    feature_id,
                    values: Vec::new(),
                });
                order.len() - 1
            });

        let pending = &mut order[slot];
        if pending.glottocode.is_none() {
            pending.glottocode = obs.glottocode.as_deref();
        }
        if !obs.is_unknown() && !pending.values.contains(&obs.value.as_str()) {
            pending.values.push(&obs.value);
        }
    }

    let merged = observations.len() - order.len();
    if merged > 0 {
        tracing::debug!(merged, "merged duplicate (language, feature) rows");
    }

    order
        .into_iter()
        .map(|pending| {
            let value = if pending.values.is_empty() {
                UNKNOWN_VALUE.to_string()
            } else {
                format!(
                    "{}{FEATURE_VALUE_SEPARATOR}{}",
                    pending.feature_id,
                    pending.values.join(VALUE_SEPARATOR)
                )
            };
            OutputRow {
                language_id: pending.language_id.to_string(),
                glottocode: pending.glottocode.map(String::from),
                feature_id: pending.feature_id,
                value,
            }
        })
        .collect()
}

/// Serialize rows as CSV with a header line.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] if serialization or the writer fails.
pub fn write_rows<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record(["Language_ID", "Glottocode", "Feature_ID", "Value"])?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `path` through a temp file in the same directory, then rename it
/// into place. A failing `write` leaves any previous file untouched. The
/// result keeps the mode of the file it replaces.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created, the temp file
/// cannot be written, or the final rename fails. Errors from `write` are
/// passed through.
pub fn write_atomically<E, F>(path: &Path, write: F) -> Result<(), E>
where
    E: From<io::Error>,
    F: FnOnce(&mut NamedTempFile) -> Result<(), E>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    write(&mut file)?;
    if let Some(permissions) = target_permissions(path)? {
        file.as_file().set_permissions(permissions)?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}

/// Mode the persisted file should carry: that of the file being replaced,
/// or `0o644` for a new file. Temp files are created owner-only.
fn target_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(error) => Err(error),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(DEFAULT_MODE))
}

#[cfg(not(unix))]
const fn default_permissions() -> Option<fs::Permissions> {
    None
}
