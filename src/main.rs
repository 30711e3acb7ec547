use anyhow::Result;
use clap::Parser;
use simcheck::analysis::{
    compare_samples, statistics_of_samples, trend_of_samples, AnalysisKind, AnalysisOutcome,
};
use simcheck::cli::{Cli, Command, OutputFormat};
use simcheck::config::AnalysisConfig;
use simcheck::ingest::load_samples;
use simcheck::json_output::JsonOutput;
use simcheck::sample::sort_by_timestamp;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file if given, otherwise defaults
fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    match &cli.config {
        Some(path) => AnalysisConfig::from_file(path),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Run the selected subcommand against files on disk
fn run(
    command: &Command,
    config: &mut AnalysisConfig,
) -> Result<(AnalysisKind, AnalysisOutcome)> {
    match command {
        Command::Compare {
            sim,
            test,
            tolerance,
        } => {
            if let Some(tolerance) = tolerance {
                config.comparison.tolerance_percent = *tolerance;
            }
            config.validate()?;

            let sim = load_samples(sim)?;
            let test = load_samples(test)?;
            let analysis = compare_samples(&sim, &test, config)?;
            Ok((AnalysisKind::Comparison, AnalysisOutcome::Comparison(analysis)))
        }
        Command::Trend { input, forecast } => {
            if let Some(steps) = forecast {
                config.trend.forecast_steps = *steps;
            }
            config.validate()?;

            let mut samples = load_samples(input)?;
            sort_by_timestamp(&mut samples);
            let analysis = trend_of_samples(&samples, config)?;
            Ok((AnalysisKind::Trend, AnalysisOutcome::Trend(analysis)))
        }
        Command::Stats { input, bins } => {
            if let Some(bins) = bins {
                config.statistics.histogram_bins = *bins;
            }
            config.validate()?;

            let samples = load_samples(input)?;
            let analysis = statistics_of_samples(&samples, config)?;
            Ok((AnalysisKind::Statistical, AnalysisOutcome::Statistical(analysis)))
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = load_config(&args)?;
    let (kind, outcome) = run(&args.command, &mut config)?;

    match args.format {
        OutputFormat::Text => print!("{}", outcome.to_report_string()),
        OutputFormat::Json => println!("{}", JsonOutput::new(kind, &config, outcome).to_json()?),
    }

    Ok(())
}
