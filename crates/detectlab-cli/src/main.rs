//! CLI for detectlab — experiment tooling for the LLM-text detector study.

mod commands;
mod tui;

use std::path::Path;

use clap::{Parser, Subcommand};
use detectlab_core::ExperimentConfig;

#[derive(Parser)]
#[command(name = "detectlab")]
#[command(about = "detectlab — sample test abstracts and chart how detectors score them")]
#[command(version = detectlab_core::VERSION)]
struct Cli {
    /// JSON experiment config; omitted fields keep the study defaults
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one rewrite prompt per abstract in the database
    Prompts {
        /// SQLite database (defaults to the config's database)
        #[arg(long)]
        db: Option<String>,

        /// Prompt file to write
        #[arg(long)]
        output: Option<String>,
    },

    /// Sample the test set and export it as text or a CSV template
    Tests {
        /// SQLite database (defaults to the config's database)
        #[arg(long)]
        db: Option<String>,

        /// Number of abstracts to sample
        #[arg(long)]
        count: Option<usize>,

        /// Sampler seed
        #[arg(long)]
        seed: Option<u64>,

        /// Export format: text (for reading) or csv (for filling in scores)
        #[arg(long, default_value = "csv", value_parser = ["text", "csv"])]
        format: String,

        /// Output file (defaults to the config's file for the chosen format)
        #[arg(long)]
        output: Option<String>,
    },

    /// Per-detector histograms of scores, split by original/rewritten
    Hist {
        /// Number of bins over [0, 1]
        #[arg(long)]
        bins: Option<usize>,

        /// Write the histogram counts as JSON to this path
        #[arg(long)]
        output: Option<String>,

        /// Print the summary only; do not open the chart viewer
        #[arg(long)]
        no_tui: bool,
    },

    /// ROC curves with AUC for every detector
    Roc {
        /// Results CSV files (defaults to the configured detectors)
        results: Vec<String>,

        /// Write the ROC points as JSON to this path
        #[arg(long)]
        output: Option<String>,

        /// Print the summary only; do not open the chart viewer
        #[arg(long)]
        no_tui: bool,
    },

    /// True/false positive rate against detection threshold
    Rates {
        /// Number of thresholds swept over [0, 1]
        #[arg(long)]
        resolution: Option<usize>,

        /// Write the rate curves as JSON to this path
        #[arg(long)]
        output: Option<String>,

        /// Print the summary only; do not open the chart viewer
        #[arg(long)]
        no_tui: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match ExperimentConfig::load_or_default(cli.config.as_deref().map(Path::new)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: config: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Prompts { db, output } => {
            commands::prompts::run(&config, db.as_deref(), output.as_deref())
        }
        Commands::Tests {
            db,
            count,
            seed,
            format,
            output,
        } => commands::testset::run(
            &config,
            commands::testset::TestsCommandConfig {
                db: db.as_deref(),
                count,
                seed,
                format: &format,
                output_path: output.as_deref(),
            },
        ),
        Commands::Hist {
            bins,
            output,
            no_tui,
        } => commands::hist::run(
            &config,
            bins,
            commands::ChartOptions {
                output_path: output.as_deref(),
                no_tui,
            },
        ),
        Commands::Roc {
            results,
            output,
            no_tui,
        } => commands::roc::run(
            &config,
            &results,
            commands::ChartOptions {
                output_path: output.as_deref(),
                no_tui,
            },
        ),
        Commands::Rates {
            resolution,
            output,
            no_tui,
        } => commands::rates::run(
            &config,
            resolution,
            commands::ChartOptions {
                output_path: output.as_deref(),
                no_tui,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
