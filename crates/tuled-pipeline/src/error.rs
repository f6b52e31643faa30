use std::path::PathBuf;

use tuled_parser::ParserError;

use crate::calibration::CalibrationError;
use crate::filter::FilterError;

/// Errors from a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
