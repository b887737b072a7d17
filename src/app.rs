use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::DatasetAnalysis;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::report::ReportWriter;

/// Creator analytics over a Douyin video export
#[derive(Parser, Debug)]
#[command(name = "douyin-insight", version)]
pub struct Cli {
    /// Spreadsheet export to analyze (.xlsx, .xls, .xlsb, .ods or .csv)
    pub input: PathBuf,

    /// TOML config file (default: ./douyin-insight.toml when present)
    #[arg(long, short = 'c', env = "DOUYIN_INSIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Print a human-readable digest to stderr
    #[arg(long)]
    pub summary: bool,
}

pub fn run() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    run_with(cli)
}

pub fn run_with(cli: Cli) -> Result<()> {
    let mut config_service = ConfigService::new();
    if let Some(path) = &cli.config {
        config_service = config_service.with_config_path(path);
    }
    let config = config_service.load()?;

    init_tracing(&config.log_level);

    let analysis = DatasetAnalysis::new(config.analysis)?;
    let result = analysis.analyze_file(&cli.input)?;

    let mut writer = ReportWriter::new().with_pretty(!cli.compact);
    if let Some(path) = &cli.output {
        writer = writer.with_output(path);
    }
    writer.write(&result)?;

    if cli.summary {
        eprintln!("{}", result.summary());
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level; logs go to stderr so stdout stays JSON
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
