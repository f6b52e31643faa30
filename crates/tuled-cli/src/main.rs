use anyhow::Context;
use clap::Parser;
use tuled_config::TuledConfig;

mod beastling;
mod cli;
mod output;
mod run;

fn main() {
    if let Err(error) = run() {
        eprintln!("tuled error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => TuledConfig::load_from(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => TuledConfig::load_with_dotenv().context("failed to load configuration")?,
    };
    cli.apply_overrides(&mut config);
    config.validate().context("invalid command-line override")?;

    let summary = run::handle(&cli, &config)?;
    output::output(&summary, cli.format)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TULED_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
