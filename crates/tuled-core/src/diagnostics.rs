//! Data-quality findings returned alongside stage output.
//!
//! Warnings never stop the pipeline. They are collected here instead of being
//! logged at the point of discovery, so callers decide how to report them and
//! tests can assert on them directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A warn-and-continue condition found while ingesting a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Warning {
    /// A feature slice mixes unknown and known columns for one taxon.
    /// The observation is still emitted as unknown.
    PartialUnknown {
        taxon: String,
        feature: String,
        subset: String,
    },

    /// A feature slice has no informative bit for one taxon.
    /// The observation is dropped.
    MissingData { taxon: String, feature: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialUnknown {
                taxon,
                feature,
                subset,
            } => write!(f, "Partial unknown in {taxon}/{feature}: '{subset}'"),
            Self::MissingData { taxon, feature } => {
                write!(f, "Missing information for {taxon}/{feature}")
            }
        }
    }
}

/// Warnings plus a count of lines the scanner could not classify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub warnings: Vec<Warning>,
    pub skipped_lines: usize,
}

impl Diagnostics {
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.skipped_lines == 0
    }

    /// Number of [`Warning::PartialUnknown`] entries.
    #[must_use]
    pub fn partial_unknowns(&self) -> usize {
        self.warnings
            .iter()
            .filter(|warning| matches!(warning, Warning::PartialUnknown { .. }))
            .count()
    }

    /// Number of [`Warning::MissingData`] entries.
    #[must_use]
    pub fn missing_data(&self) -> usize {
        self.warnings
            .iter()
            .filter(|warning| matches!(warning, Warning::MissingData { .. }))
            .count()
    }
}

/// Stage output paired with the diagnostics produced while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosed<T> {
    pub data: T,
    pub diagnostics: Diagnostics,
}

impl<T> Diagnosed<T> {
    /// Wrap data that produced no diagnostics.
    pub fn clean(data: T) -> Self {
        Self {
            data,
            diagnostics: Diagnostics::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_warnings_by_kind() {
        let mut diagnostics = Diagnostics::default();
        assert!(diagnostics.is_clean());

        diagnostics.warn(Warning::PartialUnknown {
            taxon: "Tupinamba".into(),
            feature: "hand".into(),
            subset: "??1".into(),
        });
        diagnostics.warn(Warning::MissingData {
            taxon: "Tupinamba".into(),
            feature: "foot".into(),
        });
        diagnostics.warn(Warning::MissingData {
            taxon: "Guarani".into(),
            feature: "foot".into(),
        });

        assert!(!diagnostics.is_clean());
        assert_eq!(diagnostics.partial_unknowns(), 1);
        assert_eq!(diagnostics.missing_data(), 2);
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let warning = Warning::MissingData {
            taxon: "Guarani".into(),
            feature: "foot".into(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "missing_data");
        assert_eq!(json["taxon"], "Guarani");
    }

    #[test]
    fn display_names_taxon_and_feature() {
        let warning = Warning::PartialUnknown {
            taxon: "Guarani".into(),
            feature: "hand".into(),
            subset: "?1".into(),
        };
        assert_eq!(warning.to_string(), "Partial unknown in Guarani/hand: '?1'");
    }
}
