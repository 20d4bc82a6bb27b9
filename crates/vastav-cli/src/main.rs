//! VASTAV CLI - suspicious object scanner

mod commands;
mod render;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vastav")]
#[command(about = "VASTAV - Suspicious object authenticity scanner")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/vastav.yaml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Scan objects and print the results
    Scan {
        /// Number of scans to run
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Label of the detected object being scanned
        #[arg(short, long)]
        object: Option<String>,
        /// Print records as JSON lines instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Scan continuously until interrupted
    Watch {
        /// Milliseconds between scans
        #[arg(short, long, default_value_t = 1000)]
        interval_ms: u64,
        /// Stop after this many scans
        #[arg(short, long)]
        limit: Option<usize>,
        /// Label of the detected object being scanned
        #[arg(short, long)]
        object: Option<String>,
    },
    /// Generate synthetic training data
    GenerateData {
        /// Number of rows (defaults to training.samples)
        #[arg(short, long)]
        samples: Option<usize>,
        /// Output CSV (defaults to training.dataset_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Train the classifier from a CSV dataset
    Train {
        /// Input CSV (defaults to training.dataset_path)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Output artifact (defaults to model.path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show recent scan records
    History {
        /// Number of most recent records to show
        #[arg(short, long, default_value_t = 10)]
        tail: usize,
    },
    /// Check configuration validity
    Check,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Scan {
            count,
            object,
            json,
        }) => commands::scan(&cli.config, count, object.as_deref(), json),
        Some(Commands::Watch {
            interval_ms,
            limit,
            object,
        }) => commands::watch(&cli.config, interval_ms, limit, object.as_deref()).await,
        Some(Commands::GenerateData { samples, out }) => {
            commands::generate_data(&cli.config, samples, out)
        }
        Some(Commands::Train { data, out }) => commands::train(&cli.config, data, out),
        Some(Commands::History { tail }) => commands::history(&cli.config, tail),
        Some(Commands::Check) => commands::check(&cli.config),
        Some(Commands::Init { force }) => commands::init(&cli.config, force),
        None => {
            println!("VASTAV v{} - Use --help for commands", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
