//! Line normalization and classification for the matrix scanner.

use std::sync::LazyLock;

use regex::Regex;

use super::concept::ConceptSpec;

/// `<feature_id>=<start>-<end>;<gloss>`
static CONCEPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^=]+)=(\d+)-(\d+);(.+)").expect("concept pattern is valid")
});

/// `<taxon><whitespace><vector>`, where the taxon contains no vector symbol.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^01?-]+)\s+([01?-]+)").expect("row pattern is valid")
});

const CHARACTERS_MARKER: &str = "BEGIN CHARACTERS";
const DATA_MARKER: &str = "BEGIN DATA";
const MATRIX_MARKER: &str = "MATRIX";

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Anything outside the characters block and the matrix.
    Preamble,
    /// Concept definitions (`hand=1-3;"hand"`).
    Characters,
    /// Taxon rows (`Tupinamba 0110?`).
    Matrix,
}

/// A normalized line, classified against the current section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A section marker; the scanner moves to the given state.
    Enter(Section),
    Concept(ConceptSpec),
    Row { taxon: &'a str, vector: &'a str },
    /// A line inside a parsed section that matched nothing.
    Unrecognized,
    /// A blank or preamble line. Not parsed, not counted.
    Ignored,
}

/// Collapse whitespace runs to a single space and trim.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify a normalized line. Markers win over section content.
#[must_use]
pub fn classify(section: Section, line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Ignored;
    }
    if line.starts_with(CHARACTERS_MARKER) {
        return Line::Enter(Section::Characters);
    }
    if line.starts_with(DATA_MARKER) {
        return Line::Enter(Section::Preamble);
    }
    if line.starts_with(MATRIX_MARKER) {
        return Line::Enter(Section::Matrix);
    }

    match section {
        Section::Preamble => Line::Ignored,
        Section::Characters => parse_concept(line).map_or(Line::Unrecognized, Line::Concept),
        Section::Matrix => parse_row(line).unwrap_or(Line::Unrecognized),
    }
}

fn parse_concept(line: &str) -> Option<ConceptSpec> {
    let captures = CONCEPT_RE.captures(line)?;
    let column_start = captures[2].parse::<usize>().ok()?;
    let column_end = captures[3].parse::<usize>().ok()?;
    if column_start == 0 || column_end < column_start {
        return None;
    }

    let gloss = captures[4].trim();
    let gloss = gloss.strip_prefix('"').unwrap_or(gloss);
    let gloss = gloss.strip_suffix('"').unwrap_or(gloss);

    Some(ConceptSpec {
        feature_id: captures[1].trim().to_string(),
        gloss: gloss.to_string(),
        column_start,
        column_end,
    })
}

fn parse_row(line: &str) -> Option<Line<'_>> {
    let captures = ROW_RE.captures(line)?;
    let taxon = captures.get(1)?.as_str().trim();
    let vector = captures.get(2)?.as_str();
    Some(Line::Row { taxon, vector })
}
