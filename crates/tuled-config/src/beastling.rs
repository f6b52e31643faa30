//! Downstream model-builder command settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "beastling".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("phylo/tuled-tg.xml")
}

fn default_configs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("beastling/tuled-tg.admin.conf"),
        PathBuf::from("beastling/tuled-tg.common.conf"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BeastlingConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,

    /// XML file the tool writes.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Configuration files passed before the generated calibration file.
    #[serde(default = "default_configs")]
    pub configs: Vec<PathBuf>,
}

impl Default for BeastlingConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            output: default_output(),
            configs: default_configs(),
        }
    }
}
