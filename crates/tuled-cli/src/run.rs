//! The single `tuled` command: prepare, write, then hand off to BEASTling.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tuled_config::TuledConfig;
use tuled_core::{Diagnostics, SourceKind, Warning};
use tuled_parser::LanguageTable;
use tuled_pipeline::{FilterStats, Pipeline};

use crate::beastling::{self, ModelRun};
use crate::cli::Cli;

/// What a run did, printed on stdout.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub source: PathBuf,
    pub source_kind: SourceKind,
    pub languages: usize,
    pub rows: usize,
    pub constraints: usize,
    pub partial_unknowns: usize,
    pub missing_data: usize,
    pub skipped_lines: usize,
    pub filter: FilterStats,
    pub datafile: PathBuf,
    pub calibration: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRun>,
}

pub fn handle(cli: &Cli, config: &TuledConfig) -> anyhow::Result<RunSummary> {
    let languages_path = config.paths.languages_file();
    let languages = LanguageTable::load(languages_path).with_context(|| {
        format!(
            "failed to read language table {}",
            languages_path.display()
        )
    })?;

    let prepared = Pipeline::from_config(config)
        .prepare(&cli.source, &languages)
        .with_context(|| format!("failed to prepare {}", cli.source.display()))?;
    report_diagnostics(&prepared.diagnostics);

    let written = prepared
        .write(
            &config.paths.datafile_path(),
            &config.paths.calibration_path(),
        )
        .context("failed to write outputs")?;

    let model = if cli.skip_model {
        tracing::debug!("skipping beastling");
        None
    } else {
        Some(beastling::run(
            &config.beastling,
            &written.calibration,
            cli.overwrite,
        ))
    };

    Ok(RunSummary {
        source: cli.source.clone(),
        source_kind: prepared.source_kind,
        languages: prepared.languages.len(),
        rows: prepared.rows.len(),
        constraints: prepared.constraints.len(),
        partial_unknowns: prepared.diagnostics.partial_unknowns(),
        missing_data: prepared.diagnostics.missing_data(),
        skipped_lines: prepared.diagnostics.skipped_lines,
        filter: prepared.stats,
        datafile: written.datafile,
        calibration: written.calibration,
        model,
    })
}

fn report_diagnostics(diagnostics: &Diagnostics) {
    for warning in &diagnostics.warnings {
        match warning {
            Warning::PartialUnknown {
                taxon,
                feature,
                subset,
            } => tracing::warn!(%taxon, %feature, %subset, "partial unknown, recorded as '?'"),
            Warning::MissingData { taxon, feature } => {
                tracing::warn!(%taxon, %feature, "missing information, observation dropped");
            }
        }
    }
    if diagnostics.skipped_lines > 0 {
        tracing::debug!(
            skipped_lines = diagnostics.skipped_lines,
            "skipped unrecognized lines"
        );
    }
}
