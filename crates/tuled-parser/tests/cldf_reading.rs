//! Integration tests for the CLDF join.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tuled_parser::cldf::{COGNATES_TABLE, FORMS_TABLE, LANGUAGES_TABLE, PARAMETERS_TABLE};
use tuled_parser::{CldfReader, ParserError};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cldf")
}

/// Copy the fixture into a temp dir, replacing one table's content.
fn fixture_with(table: &str, content: &str) -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir should create");
    for name in [LANGUAGES_TABLE, PARAMETERS_TABLE, FORMS_TABLE, COGNATES_TABLE] {
        std::fs::copy(fixture_dir().join(name), temp.path().join(name)).expect("copy fixture");
    }
    std::fs::write(temp.path().join(table), content).expect("overwrite table");
    temp
}

#[test]
fn joins_cognates_to_languages_and_parameters() {
    let observations = CldfReader::new(fixture_dir()).read().expect("fixture reads");

    let rows: Vec<_> = observations
        .iter()
        .map(|obs| {
            (
                obs.language_id.as_str(),
                obs.glottocode.as_deref(),
                obs.feature_id.as_str(),
                obs.value.as_str(),
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ("tupinamba", Some("tupi1276"), "hand", "hand-1"),
            ("tupinamba", Some("tupi1276"), "water", "water-1"),
            ("guarani", Some("para1311"), "hand", "hand-1"),
            ("guarani", Some("para1311"), "water", "water-1"),
            ("kamayura", Some("kama1373"), "hand", "hand-2"),
        ]
    );
}

#[test]
fn empty_glottocode_is_absent() {
    let temp = fixture_with(
        LANGUAGES_TABLE,
        "ID,Glottocode\ntupinamba,\nguarani,para1311\nkamayura,kama1373\n",
    );
    let observations = CldfReader::new(temp.path()).read().expect("reads");
    assert_eq!(observations[0].glottocode, None);
    assert_eq!(observations[2].glottocode.as_deref(), Some("para1311"));
}

#[test]
fn missing_form_is_fatal_and_names_the_row() {
    let temp = fixture_with(
        COGNATES_TABLE,
        "ID,Form_ID,Cognateset_ID\nc1,tupinamba-hand,hand-1\nc2,nowhere-hand,hand-1\n",
    );

    let error = CldfReader::new(temp.path()).read().unwrap_err();
    match error {
        ParserError::UnresolvedReference {
            table,
            row_id,
            column,
            key,
            target_table,
        } => {
            assert_eq!(table, COGNATES_TABLE);
            assert_eq!(row_id, "c2");
            assert_eq!(column, "Form_ID");
            assert_eq!(key, "nowhere-hand");
            assert_eq!(target_table, FORMS_TABLE);
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn missing_language_is_fatal() {
    let temp = fixture_with(
        FORMS_TABLE,
        "ID,Language_ID,Parameter_ID\ntupinamba-hand,tupinamba,hand\ntupinamba-water,tupinamba,water\nguarani-hand,guarani,hand\nguarani-water,mbya,water\nkamayura-hand,kamayura,hand\n",
    );

    let error = CldfReader::new(temp.path()).read().unwrap_err();
    assert!(matches!(
        error,
        ParserError::UnresolvedReference { ref row_id, ref target_table, .. }
            if row_id == "guarani-water" && target_table == LANGUAGES_TABLE
    ));
}

#[test]
fn missing_parameter_is_fatal() {
    let temp = fixture_with(PARAMETERS_TABLE, "ID\nhand\n");

    let error = CldfReader::new(temp.path()).read().unwrap_err();
    assert!(matches!(
        error,
        ParserError::UnresolvedReference { ref column, ref key, .. }
            if column == "Parameter_ID" && key == "water"
    ));
}

#[test]
fn missing_required_column_is_fatal() {
    let temp = fixture_with(COGNATES_TABLE, "ID,Form_ID\nc1,tupinamba-hand\n");

    let error = CldfReader::new(temp.path()).read().unwrap_err();
    assert!(matches!(
        error,
        ParserError::MissingColumn { ref table, ref column }
            if table == COGNATES_TABLE && column == "Cognateset_ID"
    ));
}

#[test]
fn duplicate_cognate_id_is_fatal() {
    let temp = fixture_with(
        COGNATES_TABLE,
        "ID,Form_ID,Cognateset_ID\nc1,tupinamba-hand,hand-1\nc1,guarani-hand,hand-1\n",
    );

    let error = CldfReader::new(temp.path()).read().unwrap_err();
    assert!(matches!(error, ParserError::DuplicateKey { ref key, .. } if key == "c1"));
}

#[test]
fn missing_table_file_is_fatal() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let error = CldfReader::new(temp.path()).read().unwrap_err();
    assert!(matches!(error, ParserError::Open { .. }));
}
