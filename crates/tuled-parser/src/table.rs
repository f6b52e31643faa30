//! Header-checked CSV table loading shared by the CLDF reader and the
//! language table.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ParserError;

/// Open `path` and deserialize every row, after checking that the header
/// carries each of `required`.
pub(crate) fn read_rows<T: DeserializeOwned>(
    path: &Path,
    table: &str,
    required: &[&str],
) -> Result<Vec<T>, ParserError> {
    let file = File::open(path).map_err(|source| ParserError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows_from(file, table, required)
}

/// Same as [`read_rows`] over an arbitrary reader.
pub(crate) fn read_rows_from<R: Read, T: DeserializeOwned>(
    reader: R,
    table: &str,
    required: &[&str],
) -> Result<Vec<T>, ParserError> {
    let csv_error = |source| ParserError::Csv {
        table: table.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?;
    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(ParserError::MissingColumn {
            table: table.to_string(),
            column: (*column).to_string(),
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_error)
}

/// Index rows by their key, rejecting duplicate keys.
pub(crate) fn index_by_key<T, F>(
    rows: Vec<T>,
    table: &str,
    key: F,
) -> Result<HashMap<String, T>, ParserError>
where
    F: Fn(&T) -> &str,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        let id = key(&row).to_string();
        if index.contains_key(&id) {
            return Err(ParserError::DuplicateKey {
                table: table.to_string(),
                key: id,
            });
        }
        index.insert(id, row);
    }
    Ok(index)
}
