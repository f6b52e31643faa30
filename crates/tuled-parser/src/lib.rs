//! # tuled-parser
//!
//! Ingestion of cognate data into long-form [`tuled_core::Observation`]s.
//!
//! - [`nexus`]: explicit state-machine scanner for EDICTOR NEXUS character
//!   matrices, with partial-cognate bit-vector decoding
//! - [`cldf`]: foreign-key join over the four CLDF tables
//! - [`languages`]: the language/calibration table and the taxon map it implies
//!
//! Fatal conditions are [`ParserError`]s. Data-quality findings are returned
//! as [`tuled_core::Diagnostics`] next to the parsed data.

pub mod cldf;
pub mod error;
pub mod languages;
pub mod nexus;
mod table;

pub use cldf::CldfReader;
pub use error::ParserError;
pub use languages::LanguageTable;
pub use nexus::{ConceptSpec, NexusParser};
