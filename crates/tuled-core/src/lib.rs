//! # tuled-core
//!
//! Core types shared by every tuled crate.
//!
//! - [`Observation`]: one long-form (language, feature, value) cell
//! - [`LanguageRecord`] and [`CalibrationTarget`]: rows of the language/calibration table
//! - [`CalibrationConstraint`]: a resolved age or clade hint for the model
//! - [`Diagnostics`] and [`Warning`]: data-quality findings returned as data
//! - [`SourceKind`]: which ingestion path a source path selects
//! - Cross-cutting error types

pub mod calibration;
pub mod diagnostics;
pub mod errors;
pub mod language;
pub mod observation;
pub mod source;

pub use calibration::CalibrationConstraint;
pub use diagnostics::{Diagnosed, Diagnostics, Warning};
pub use errors::CoreError;
pub use language::{CalibrationTarget, LanguageRecord, ROOT_KEY};
pub use observation::{Observation, UNKNOWN_VALUE, VALUE_SEPARATOR};
pub use source::SourceKind;
