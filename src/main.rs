//! CLI entry point for the auto-mpg analyzer.
//!
//! Provides subcommands for printing the cleaned dataset and for averaging
//! fuel economy by model year or by manufacturer.

use anyhow::{Context, Result};
use autompg::aggregate::{mpg_by_make, mpg_by_year, sorted_averages};
use autompg::config::Config;
use autompg::fetch::HttpSource;
use autompg::output::{
    OutputFormat, open_output, write_average_report, write_records, write_records_json,
};
use autompg::parser::FieldParser;
use autompg::{Corpus, SortOrder};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const CHART_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "autompg")]
#[command(about = "Analyze the auto-mpg fuel economy dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Sort order for `print`: default, year or mpg
    #[arg(short, long, global = true, default_value = "default", value_name = "SORT_ORDER")]
    sort: String,

    /// File to write output to instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    ofile: Option<PathBuf>,

    /// Also draw a bar chart of the averages (stderr, or stdout with --ofile)
    #[arg(short, long, global = true, default_value_t = false)]
    plot: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record as Make, Model, Year, MPG
    Print,
    /// Average MPG for each model year
    #[command(name = "mpg_by_year")]
    MpgByYear,
    /// Average MPG for each manufacturer
    #[command(name = "mpg_by_make")]
    MpgByMake,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let config = Config::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("autompg.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    info!("Main function started");

    let corpus = load_corpus(&config)?;
    let out = open_output(cli.ofile.as_deref())?;

    match cli.command {
        Commands::Print => {
            let mut corpus = corpus;
            let order = cli.sort.parse::<SortOrder>().unwrap_or_else(|e| {
                warn!(error = %e, "Improper sort order, sorting by default");
                SortOrder::Default
            });
            info!(%order, "Sorting data");
            corpus.sort(order);

            match cli.format {
                Format::Csv => write_records(out, &corpus)?,
                Format::Json => write_records_json(out, &corpus)?,
            }
        }
        Commands::MpgByYear => {
            let rows = sorted_averages(mpg_by_year(&corpus));
            write_average_report(
                out,
                chart_writer(&cli),
                cli.format.into(),
                "MPG By Year",
                "Year",
                &rows,
                CHART_WIDTH,
            )?;
        }
        Commands::MpgByMake => {
            let rows = sorted_averages(mpg_by_make(&corpus));
            write_average_report(
                out,
                chart_writer(&cli),
                cli.format.into(),
                "MPG By Make",
                "Make",
                &rows,
                CHART_WIDTH,
            )?;
        }
    }

    info!("Main function ended");
    Ok(())
}

/// Loads the corpus from the configured cache directory, downloading the
/// raw dataset on first run.
#[tracing::instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
fn load_corpus(config: &Config) -> Result<Corpus> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;

    let source = HttpSource::new(config.source_url.clone());
    let corpus = Corpus::load(&config.cache_files(), &source, &FieldParser::default())
        .context("loading auto-mpg dataset")?;

    info!(records = corpus.len(), "Dataset ready");
    Ok(corpus)
}

/// The chart goes to stdout only when the data itself is written to a file.
fn chart_writer(cli: &Cli) -> Option<Box<dyn Write>> {
    if !cli.plot {
        return None;
    }
    Some(match cli.ofile {
        Some(_) => Box::new(io::stdout()),
        None => Box::new(io::stderr()),
    })
}
