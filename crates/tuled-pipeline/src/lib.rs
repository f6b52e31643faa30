//! # tuled-pipeline
//!
//! Everything between ingestion and the model builder:
//!
//! - [`filter`]: two-pass language/feature coverage filter
//! - [`calibration`]: dated and clade constraints from the language table
//! - [`output`]: feature-id normalization and the long-form CSV writer
//! - [`pipeline`]: the end-to-end run that ties the stages together

pub mod calibration;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;

pub use calibration::{CalibrationBuilder, CalibrationError};
pub use error::PipelineError;
pub use filter::{CoverageFilter, FilterError, FilterOutcome, FilterStats};
pub use output::{OutputRow, normalize_feature_id};
pub use pipeline::{Pipeline, PreparedDataset, WrittenOutputs};
