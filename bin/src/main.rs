//! Marasi CLI binary.
//!
//! Provides command-line access to the market analytics pipeline.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "marasi")]
#[command(about = "Real-estate market analytics over economic time series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the datasets the pipeline knows how to align
    Datasets {
        /// Show field mappings and aggregations
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fetch raw dataset documents from the open-data API into JSON files
    Fetch {
        /// Dataset name(s) to fetch
        #[arg(short, long, value_delimiter = ',')]
        datasets: Vec<String>,

        /// Output directory for the JSON files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Align datasets on the quarterly axis and report correlations
    Analyze {
        /// Dataset inputs as name=path.json (name must be registered)
        #[arg(short, long = "dataset", value_name = "NAME=PATH")]
        datasets: Vec<String>,

        /// Number of top factor pairs to show
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Datasets { verbose } => {
            cmd::datasets::list_datasets(verbose)?;
        }
        Commands::Fetch { datasets, out } => {
            cmd::fetch::fetch_datasets(&datasets, &out).await?;
        }
        Commands::Analyze {
            datasets,
            top,
            format,
        } => {
            cmd::analyze::run_analysis(&datasets, top, &format)?;
        }
    }

    Ok(())
}
