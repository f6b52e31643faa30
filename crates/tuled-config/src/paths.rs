//! Input and output locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_languages_file() -> PathBuf {
    PathBuf::from("beastling/languages.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("beastling")
}

fn default_datafile() -> String {
    "tuled.csv".to_string()
}

fn default_calibration_file() -> String {
    "calibration.conf".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Language/calibration table (`Language`, `Nexus_Name`, `Calibration`).
    #[serde(default = "default_languages_file")]
    pub languages_file: PathBuf,

    /// Directory receiving the observation table and calibration file.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the observation table inside `output_dir`.
    #[serde(default = "default_datafile")]
    pub datafile: String,

    /// File name of the calibration file inside `output_dir`.
    #[serde(default = "default_calibration_file")]
    pub calibration_file: String,
}

impl PathsConfig {
    #[must_use]
    pub fn datafile_path(&self) -> PathBuf {
        self.output_dir.join(&self.datafile)
    }

    #[must_use]
    pub fn calibration_path(&self) -> PathBuf {
        self.output_dir.join(&self.calibration_file)
    }

    #[must_use]
    pub fn languages_file(&self) -> &Path {
        &self.languages_file
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            languages_file: default_languages_file(),
            output_dir: default_output_dir(),
            datafile: default_datafile(),
            calibration_file: default_calibration_file(),
        }
    }
}
