//! NEXUS character-matrix parsing.
//!
//! Reads the matrix export written by EDICTOR: a `BEGIN CHARACTERS` block
//! declaring one column range per concept (`hand=1-3;"hand"`), followed by a
//! `MATRIX` of taxon bit-vectors. A concept with several cognate classes spans
//! several columns, so one taxon can carry more than one class per concept
//! (partial cognates); those are encoded as `_`-joined column offsets.
//!
//! The scanner is line-based and best-effort: lines that do not match inside
//! a parsed section are skipped and counted, never fatal.

mod concept;
mod line;

pub use concept::{Cell, ConceptSpec};
pub use line::{Line, Section};

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tuled_core::{Diagnosed, Diagnostics, Observation, Warning};

use crate::error::ParserError;

/// Matrix parser configured with a taxon map and an exclusion set.
#[derive(Debug, Clone, Default)]
pub struct NexusParser {
    /// Matrix taxon name -> canonical language id.
    taxon_map: HashMap<String, String>,
    /// Taxa dropped before any per-concept work.
    excluded: HashSet<String>,
}

impl NexusParser {
    #[must_use]
    pub fn new(taxon_map: HashMap<String, String>) -> Self {
        Self {
            taxon_map,
            excluded: HashSet::new(),
        }
    }

    /// Skip these taxa entirely: no observations, no warnings.
    #[must_use]
    pub fn with_excluded<I, S>(mut self, taxa: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(taxa.into_iter().map(Into::into));
        self
    }

    /// Parse a matrix file.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Open`] if the file cannot be opened, and any
    /// error from [`Self::parse`].
    pub fn parse_file(&self, path: &Path) -> Result<Diagnosed<Vec<Observation>>, ParserError> {
        let file = File::open(path).map_err(|source| ParserError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = self.parse(BufReader::new(file))?;

        tracing::debug!(
            path = %path.display(),
            observations = parsed.data.len(),
            warnings = parsed.diagnostics.warnings.len(),
            skipped_lines = parsed.diagnostics.skipped_lines,
            "parsed nexus matrix"
        );
        Ok(parsed)
    }

    /// Parse a matrix from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::UnmappedTaxon`] for a non-excluded taxon missing
    /// from the taxon map, or [`ParserError::Io`] if reading fails.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Diagnosed<Vec<Observation>>, ParserError> {
        let mut scanner = Scanner::new(self);
        for (idx, raw) in reader.lines().enumerate() {
            scanner.feed(idx + 1, &raw?)?;
        }
        Ok(scanner.finish())
    }

    /// Parse a matrix held in memory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse`].
    pub fn parse_str(&self, source: &str) -> Result<Diagnosed<Vec<Observation>>, ParserError> {
        self.parse(source.as_bytes())
    }

    fn resolve(&self, taxon: &str, line: usize) -> Result<&str, ParserError> {
        self.taxon_map
            .get(taxon)
            .map(String::as_str)
            .ok_or_else(|| ParserError::UnmappedTaxon {
                taxon: taxon.to_string(),
                line,
            })
    }
}

/// Per-run scanner state.
struct Scanner<'p> {
    parser: &'p NexusParser,
    section: Section,
    concepts: Vec<ConceptSpec>,
    observations: Vec<Observation>,
    diagnostics: Diagnostics,
}

impl<'p> Scanner<'p> {
    fn new(parser: &'p NexusParser) -> Self {
        Self {
            parser,
            section: Section::Preamble,
            concepts: Vec::new(),
            observations: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParserError> {
        let normalized = line::normalize(raw);

        match line::classify(self.section, &normalized) {
            Line::Enter(section) => self.section = section,
            Line::Concept(concept) => self.concepts.push(concept),
            Line::Row { taxon, vector } => self.row(line_no, taxon, vector)?,
            Line::Unrecognized => {
                tracing::trace!(line = line_no, content = %normalized, "skipping unrecognized line");
                self.diagnostics.skipped_lines += 1;
            }
            Line::Ignored => {}
        }
        Ok(())
    }

    fn row(&mut self, line_no: usize, taxon: &str, vector: &str) -> Result<(), ParserError> {
        let parser = self.parser;
        if parser.excluded.contains(taxon) {
            tracing::debug!(taxon, "skipping excluded taxon");
            return Ok(());
        }

        let language_id = parser.resolve(taxon, line_no)?;

        for concept in &self.concepts {
            let cell = concept.decode(vector);

            if matches!(cell, Cell::Unknown { partial: true }) {
                self.diagnostics.warn(Warning::PartialUnknown {
                    taxon: taxon.to_string(),
                    feature: concept.gloss.clone(),
                    subset: concept.slice(vector).to_string(),
                });
            }

            match cell.value() {
                Some(value) => self.observations.push(Observation::new(
                    language_id,
                    concept.gloss.as_str(),
                    value,
                )),
                None => self.diagnostics.warn(Warning::MissingData {
                    taxon: taxon.to_string(),
                    feature: concept.gloss.clone(),
                }),
            }
        }
        Ok(())
    }

    fn finish(self) -> Diagnosed<Vec<Observation>> {
        Diagnosed {
            data: self.observations,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests;
