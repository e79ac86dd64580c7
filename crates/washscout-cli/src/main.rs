mod input;
mod names;
mod output;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "washscout")]
#[command(about = "Classify car washes near a list of sites as express-tunnel competitors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Survey every site in an input CSV and append the results
    Run {
        /// CSV with a header row; columns are address, latitude, longitude
        #[arg(long)]
        input: PathBuf,
        /// First data row to process (zero-based, inclusive)
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Data row to stop before; defaults to the end of the file
        #[arg(long)]
        end: Option<usize>,
        /// Directory for competitor_analysis.csv and competitor_summary.csv
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Print the normalized matching key for each name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Check names against the reference registry
    Match {
        #[arg(required = true)]
        names: Vec<String>,
        /// Reference CSV with a "Company Name" column; defaults to the built-in list
        #[arg(long, env = "WASHSCOUT_REFERENCE_CSV")]
        reference_csv: Option<PathBuf>,
    },
}

fn init_tracing(fallback_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            start,
            end,
            output_dir,
        } => {
            let config = washscout_core::load_app_config()?;
            init_tracing(&config.log_level);
            tracing::debug!(?config, "configuration loaded");

            let range = input::RowRange::new(start, end)?;
            run::run_survey(&config, &input, range, &output_dir).await?;
        }
        Commands::Normalize { names } => {
            names::print_normalized(&names);
        }
        Commands::Match {
            names,
            reference_csv,
        } => {
            init_tracing("warn");
            names::print_matches(&names, reference_csv.as_deref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
