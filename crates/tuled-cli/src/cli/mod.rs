use std::path::PathBuf;

use clap::Parser;
use tuled_config::TuledConfig;

pub mod format;

pub use format::OutputFormat;

/// Top-level CLI parser for the `tuled` binary.
///
/// Flags left unset fall back to the loaded configuration.
#[derive(Debug, Parser)]
#[command(
    name = "tuled",
    version,
    about = "Prepare TuLeD cognate data and calibrations for BEASTling"
)]
pub struct Cli {
    /// NEXUS matrix (`.nex`) or CLDF directory to read
    pub source: PathBuf,

    /// Name of the observation table written to the output directory [default: tuled.csv]
    #[arg(short, long)]
    pub datafile: Option<String>,

    /// Minimum share of features a language must cover [default: 0.5]
    #[arg(short, long)]
    pub ratio_threshold: Option<f64>,

    /// Minimum coverage of a feature relative to the best-covered one [default: 0.7]
    #[arg(short, long)]
    pub coverage_threshold: Option<f64>,

    /// Let BEASTling overwrite an existing XML file
    #[arg(long)]
    pub overwrite: bool,

    /// Language/calibration table [default: beastling/languages.csv]
    #[arg(long)]
    pub languages: Option<PathBuf>,

    /// Directory receiving the data and calibration files [default: beastling]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Year that dated calibrations are measured back from [default: 2020]
    #[arg(long)]
    pub reference_year: Option<f64>,

    /// Matrix taxon to skip (repeatable)
    #[arg(long = "exclude", value_name = "TAXON")]
    pub exclude: Vec<String>,

    /// Write the outputs but do not run BEASTling
    #[arg(long)]
    pub skip_model: bool,

    /// Extra TOML config file, layered below environment variables
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Summary format: json, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay explicitly passed flags onto the loaded configuration.
    pub fn apply_overrides(&self, config: &mut TuledConfig) {
        if let Some(datafile) = &self.datafile {
            config.paths.datafile.clone_from(datafile);
        }
        if let Some(ratio) = self.ratio_threshold {
            config.filter.ratio_threshold = ratio;
        }
        if let Some(coverage) = self.coverage_threshold {
            config.filter.coverage_threshold = coverage;
        }
        if let Some(languages) = &self.languages {
            config.paths.languages_file.clone_from(languages);
        }
        if let Some(output_dir) = &self.output_dir {
            config.paths.output_dir.clone_from(output_dir);
        }
        if let Some(year) = self.reference_year {
            config.calibration.reference_year = year;
        }
        for taxon in &self.exclude {
            if !config.nexus.excluded_taxa.contains(taxon) {
                config.nexus.excluded_taxa.push(taxon.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use tuled_config::TuledConfig;

    use super::{Cli, OutputFormat};

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::try_parse_from([
            "tuled", "data.nex", "-d", "out.csv", "-r", "0.4", "-c", "0.6", "-f", "raw", "-v",
        ])
        .expect("cli should parse");

        assert_eq!(cli.source, PathBuf::from("data.nex"));
        assert_eq!(cli.datafile.as_deref(), Some("out.csv"));
        assert_eq!(cli.ratio_threshold, Some(0.4));
        assert_eq!(cli.coverage_threshold, Some(0.6));
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(!cli.overwrite);
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["tuled"]).is_err());
    }

    #[test]
    fn format_rejects_table() {
        assert!(Cli::try_parse_from(["tuled", "cldf", "--format", "table"]).is_err());
    }

    #[test]
    fn unset_flags_keep_config_values() {
        let cli = Cli::try_parse_from(["tuled", "cldf"]).expect("cli should parse");
        let mut config = TuledConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, TuledConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "tuled",
            "tuled.nex",
            "--ratio-threshold",
            "0.25",
            "--output-dir",
            "build",
            "--languages",
            "meta/languages.csv",
            "--reference-year",
            "2024",
            "--exclude",
            "Apiaká",
            "--exclude",
            "Apiaká",
        ])
        .expect("cli should parse");

        let mut config = TuledConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.filter.ratio_threshold, 0.25);
        assert_eq!(config.filter.coverage_threshold, 0.7);
        assert_eq!(config.paths.datafile_path(), PathBuf::from("build/tuled.csv"));
        assert_eq!(config.paths.languages_file, PathBuf::from("meta/languages.csv"));
        assert_eq!(config.calibration.reference_year, 2024.0);
        assert_eq!(config.nexus.excluded_taxa, vec!["Apiaká".to_string()]);
    }
}
