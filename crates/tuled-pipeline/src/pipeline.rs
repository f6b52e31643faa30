//! End-to-end run: ingest, filter, format, calibrate, write.
//!
//! Everything up to [`PreparedDataset::write`] happens in memory, so a fatal
//! error in any stage leaves the output directory untouched.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tuled_config::TuledConfig;
use tuled_core::{CalibrationConstraint, Diagnosed, Diagnostics, Observation, SourceKind};
use tuled_parser::{CldfReader, LanguageTable, NexusParser};

use crate::calibration::{CalibrationBuilder, render_calibration};
use crate::error::PipelineError;
use crate::filter::{CoverageFilter, FilterStats};
use crate::output::{OutputRow, format_observations, write_atomically, write_rows};

/// Stage settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    filter: CoverageFilter,
    calibration: CalibrationBuilder,
    excluded_taxa: Vec<String>,
}

impl Pipeline {
    #[must_use]
    pub const fn new(filter: CoverageFilter, calibration: CalibrationBuilder) -> Self {
        Self {
            filter,
            calibration,
            excluded_taxa: Vec::new(),
        }
    }

    /// Build stage settings from loaded configuration.
    #[must_use]
    pub fn from_config(config: &TuledConfig) -> Self {
        Self::new(
            CoverageFilter::new(
                config.filter.ratio_threshold,
                config.filter.coverage_threshold,
            ),
            CalibrationBuilder::new(
                config.calibration.reference_year,
                config.calibration.min_age,
            ),
        )
        .with_excluded(config.nexus.excluded_taxa.iter().cloned())
    }

    /// Matrix taxa to skip without resolving them.
    #[must_use]
    pub fn with_excluded<I, S>(mut self, taxa: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_taxa.extend(taxa.into_iter().map(Into::into));
        self
    }

    /// Read raw observations from `source`, choosing the reader by path.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Parser`] for any fatal ingestion error.
    pub fn ingest(
        &self,
        source: &Path,
        languages: &LanguageTable,
    ) -> Result<Diagnosed<Vec<Observation>>, PipelineError> {
        let kind = SourceKind::from_path(source);
        tracing::debug!(source = %source.display(), kind = kind.as_str(), "ingesting source");

        let observations = match kind {
            SourceKind::Nexus => NexusParser::new(languages.taxon_map())
                .with_excluded(self.excluded_taxa.iter().cloned())
                .parse_file(source)?,
            SourceKind::Cldf => Diagnosed::clean(CldfReader::new(source).read()?),
        };
        Ok(observations)
    }

    /// Run every stage in memory.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from ingestion, filtering, or
    /// calibration.
    pub fn prepare(
        &self,
        source: &Path,
        languages: &LanguageTable,
    ) -> Result<PreparedDataset, PipelineError> {
        let Diagnosed {
            data: observations,
            diagnostics,
        } = self.ingest(source, languages)?;

        let outcome = self.filter.apply(observations)?;
        let survivors = outcome.languages();
        let rows = format_observations(&outcome.observations);
        let constraints = self.calibration.build(languages.records(), &survivors)?;

        Ok(PreparedDataset {
            source_kind: SourceKind::from_path(source),
            rows,
            constraints,
            languages: survivors,
            diagnostics,
            stats: outcome.stats,
        })
    }
}

/// The fully computed outputs of a run, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedDataset {
    pub source_kind: SourceKind,
    pub rows: Vec<OutputRow>,
    pub constraints: Vec<CalibrationConstraint>,
    pub languages: BTreeSet<String>,
    pub diagnostics: Diagnostics,
    pub stats: FilterStats,
}

/// Where a run wrote its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenOutputs {
    pub datafile: PathBuf,
    pub calibration: PathBuf,
}

impl PreparedDataset {
    /// Write the observation table and the calibration file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Write`] naming the file that failed.
    pub fn write(
        &self,
        datafile: &Path,
        calibration: &Path,
    ) -> Result<WrittenOutputs, PipelineError> {
        write_atomically(datafile, |file| {
            write_rows(file, &self.rows).map_err(io::Error::from)
        })
        .map_err(|source| PipelineError::Write {
            path: datafile.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %datafile.display(), rows = self.rows.len(), "wrote data");

        write_atomically(calibration, |file| {
            file.write_all(render_calibration(&self.constraints).as_bytes())
        })
        .map_err(|source| PipelineError::Write {
            path: calibration.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %calibration.display(),
            constraints = self.constraints.len(),
            "wrote calibration"
        );

        Ok(WrittenOutputs {
            datafile: datafile.to_path_buf(),
            calibration: calibration.to_path_buf(),
        })
    }
}
