//! The BEASTling call that turns the prepared files into a BEAST2 XML.
//!
//! The exit status is reported, never acted on.

use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tuled_config::BeastlingConfig;

/// What happened when the model builder was run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRun {
    pub command: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// `<program> --verbose -o <xml> [--overwrite] <configs...> <calibration>`
pub fn build_command(config: &BeastlingConfig, calibration: &Path, overwrite: bool) -> Command {
    let mut command = Command::new(&config.program);
    command.arg("--verbose").arg("-o").arg(&config.output);
    if overwrite {
        command.arg("--overwrite");
    }
    command.args(&config.configs).arg(calibration);
    command
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the model builder synchronously and log how it went.
pub fn run(config: &BeastlingConfig, calibration: &Path, overwrite: bool) -> ModelRun {
    let mut command = build_command(config, calibration, overwrite);
    let described = describe(&command);
    tracing::info!(command = %described, "running beastling");

    match command.status() {
        Ok(status) => {
            if status.success() {
                tracing::info!(output = %config.output.display(), "beastling finished");
            } else {
                tracing::warn!(code = ?status.code(), "beastling exited with a failure status");
            }
            ModelRun {
                command: described,
                exit_code: status.code(),
                success: status.success(),
            }
        }
        Err(error) => {
            tracing::warn!(%error, program = %config.program, "failed to start beastling");
            ModelRun {
                command: described,
                exit_code: None,
                success: false,
            }
        }
    }
}
