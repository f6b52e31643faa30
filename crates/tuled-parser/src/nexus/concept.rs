//! Concept column ranges and per-taxon cell decoding.

use serde::{Deserialize, Serialize};
use tuled_core::{UNKNOWN_VALUE, VALUE_SEPARATOR};

const UNKNOWN_SYMBOL: u8 = b'?';
const PRESENT_SYMBOL: u8 = b'1';

/// One feature's cognate-class columns inside a taxon bit-vector.
///
/// `column_start` and `column_end` are 1-indexed and inclusive, as written in
/// the characters block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSpec {
    pub feature_id: String,
    pub gloss: String,
    pub column_start: usize,
    pub column_end: usize,
}

impl ConceptSpec {
    /// The part of `vector` covered by this concept, clamped to its length.
    #[must_use]
    pub fn slice<'v>(&self, vector: &'v str) -> &'v str {
        let end = self.column_end.min(vector.len());
        let start = (self.column_start - 1).min(end);
        &vector[start..end]
    }

    /// Decode this concept's cell for one taxon.
    #[must_use]
    pub fn decode(&self, vector: &str) -> Cell {
        Cell::decode(self.slice(vector))
    }
}

/// Decoded value of one (taxon, concept) slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The slice contains `?`. `partial` is set when it also has known columns.
    Unknown { partial: bool },
    /// Positions of the `1` columns, `_`-joined.
    Known(String),
    /// No `?` and no `1`: nothing informative.
    Empty,
}

impl Cell {
    #[must_use]
    pub fn decode(subset: &str) -> Self {
        let bytes = subset.as_bytes();
        if bytes.contains(&UNKNOWN_SYMBOL) {
            let partial = bytes.iter().any(|byte| *byte != UNKNOWN_SYMBOL);
            return Self::Unknown { partial };
        }

        let positions = bytes
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == PRESENT_SYMBOL)
            .map(|(idx, _)| idx.to_string())
            .collect::<Vec<_>>();

        if positions.is_empty() {
            Self::Empty
        } else {
            Self::Known(positions.join(VALUE_SEPARATOR))
        }
    }

    /// Observation value for this cell, or `None` when it must be dropped.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Unknown { .. } => Some(UNKNOWN_VALUE),
            Self::Known(value) => Some(value),
            Self::Empty => None,
        }
    }
}
