use std::collections::HashMap;

use pretty_assertions::assert_eq;

use super::*;

const SAMPLE: &str = r#"#NEXUS

BEGIN CHARACTERS;
DIMENSIONS NCHAR=7;
    hand=1-3;"hand"
    foot=4-5;"foot"
    water=6-7;"water"
END;

BEGIN DATA;
DIMENSIONS NTAX=3 NCHAR=7;
FORMAT DATATYPE=STANDARD GAP=- MISSING=? interleave=yes;
MATRIX
Tupinamba      1100110
Guarani        ??10000
Apiaká         1001001
;
END;
"#;

fn taxon_map() -> HashMap<String, String> {
    [
        ("Tupinamba", "tupinamba"),
        ("Guarani", "guarani"),
        ("Apiaká", "apiaka"),
    ]
    .into_iter()
    .map(|(taxon, language)| (taxon.to_string(), language.to_string()))
    .collect()
}

fn triples(observations: &[Observation]) -> Vec<(&str, &str, &str)> {
    observations
        .iter()
        .map(|obs| {
            (
                obs.language_id.as_str(),
                obs.feature_id.as_str(),
                obs.value.as_str(),
            )
        })
        .collect()
}

#[test]
fn parses_sample_matrix() {
    let parsed = NexusParser::new(taxon_map()).parse_str(SAMPLE).unwrap();

    assert_eq!(
        triples(&parsed.data),
        vec![
            ("tupinamba", "hand", "0_1"),
            ("tupinamba", "foot", "1"),
            ("tupinamba", "water", "0"),
            ("guarani", "hand", "?"),
            ("apiaka", "hand", "0"),
            ("apiaka", "foot", "0"),
            ("apiaka", "water", "1"),
        ]
    );
    assert!(parsed.data.iter().all(|obs| obs.glottocode.is_none()));
}

#[test]
fn reports_partial_unknown_and_missing_data() {
    let parsed = NexusParser::new(taxon_map()).parse_str(SAMPLE).unwrap();

    assert_eq!(
        parsed.diagnostics.warnings,
        vec![
            Warning::PartialUnknown {
                taxon: "Guarani".to_string(),
                feature: "hand".to_string(),
                subset: "??1".to_string(),
            },
            Warning::MissingData {
                taxon: "Guarani".to_string(),
                feature: "foot".to_string(),
            },
            Warning::MissingData {
                taxon: "Guarani".to_string(),
                feature: "water".to_string(),
            },
        ]
    );
}

#[test]
fn counts_skipped_lines_in_parsed_sections() {
    let parsed = NexusParser::new(taxon_map()).parse_str(SAMPLE).unwrap();
    // DIMENSIONS and END; in the characters block, ';' and END; after the matrix.
    assert_eq!(parsed.diagnostics.skipped_lines, 4);
}

#[test]
fn excluded_taxon_produces_nothing() {
    let parsed = NexusParser::new(taxon_map())
        .with_excluded(["Guarani", "Apiaká"])
        .parse_str(SAMPLE)
        .unwrap();

    assert!(parsed.data.iter().all(|obs| obs.language_id == "tupinamba"));
    assert!(parsed.diagnostics.warnings.is_empty());
}

#[test]
fn excluded_taxon_needs_no_mapping() {
    let mut map = taxon_map();
    map.remove("Apiaká");

    let parsed = NexusParser::new(map)
        .with_excluded(["Apiaká"])
        .parse_str(SAMPLE)
        .expect("excluded taxa are never resolved");
    assert_eq!(parsed.data.len(), 4);
}

#[test]
fn unmapped_taxon_is_fatal() {
    let mut map = taxon_map();
    map.remove("Guarani");

    let error = NexusParser::new(map).parse_str(SAMPLE).unwrap_err();
    match error {
        ParserError::UnmappedTaxon { taxon, line } => {
            assert_eq!(taxon, "Guarani");
            assert_eq!(line, 15);
        }
        other => panic!("expected UnmappedTaxon, got {other:?}"),
    }
}

#[test]
fn concepts_are_sliced_in_declaration_order() {
    let source = "BEGIN CHARACTERS;\nzeta=1-2;\"zeta\"\nalpha=3-3;\"alpha\"\nMATRIX\nA 101\n";
    let map = HashMap::from([("A".to_string(), "a".to_string())]);

    let parsed = NexusParser::new(map).parse_str(source).unwrap();
    assert_eq!(
        triples(&parsed.data),
        vec![("a", "zeta", "0"), ("a", "alpha", "0")]
    );
}

#[test]
fn fully_known_range_lists_every_position() {
    let source = "BEGIN CHARACTERS;\nhand=1-3;\"hand\"\nMATRIX\nA 111\n";
    let map = HashMap::from([("A".to_string(), "a".to_string())]);

    let parsed = NexusParser::new(map).parse_str(source).unwrap();
    assert_eq!(triples(&parsed.data), vec![("a", "hand", "0_1_2")]);
    assert!(parsed.diagnostics.warnings.is_empty());
}

#[test]
fn data_marker_closes_the_characters_block() {
    let source = "BEGIN CHARACTERS;\nhand=1-1;\"hand\"\nBEGIN DATA;\nfoot=2-2;\"foot\"\nMATRIX\nA 11\n";
    let map = HashMap::from([("A".to_string(), "a".to_string())]);

    let parsed = NexusParser::new(map).parse_str(source).unwrap();
    assert_eq!(triples(&parsed.data), vec![("a", "hand", "0")]);
    assert_eq!(parsed.diagnostics.skipped_lines, 0);
}

#[test]
fn parse_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("tuled.nex");
    std::fs::write(&path, SAMPLE).expect("write sample");

    let parsed = NexusParser::new(taxon_map()).parse_file(&path).unwrap();
    assert_eq!(parsed.data.len(), 7);
}

#[test]
fn parse_file_reports_missing_file() {
    let error = NexusParser::default()
        .parse_file(Path::new("/nonexistent/tuled.nex"))
        .unwrap_err();
    assert!(matches!(error, ParserError::Open { .. }));
}
