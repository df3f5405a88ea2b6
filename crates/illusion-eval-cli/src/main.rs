//! illusion-eval CLI - Optical-illusion benchmark scoring tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// Score vision-language model predictions on optical-illusion tasks.
#[derive(Parser)]
#[command(name = "illusion-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score prediction files against the dataset ground truth
    Eval {
        /// VQA predictions JSON (data ID -> answer)
        #[arg(long)]
        vqa_predictions: Option<PathBuf>,

        /// Grounding predictions JSON (data ID -> [x1, y1, x2, y2])
        #[arg(long)]
        vg_predictions: Option<PathBuf>,

        /// Dataset directory with pair info and annotation files
        #[arg(long, default_value = "./dataset", env = "ILLUSION_DATA_DIR")]
        data_dir: PathBuf,

        /// Directory to write results.json and results.csv
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// IoU threshold for bounding-box matching
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,

        /// Judge pairs in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the report as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Show dataset pair and category counts
    Info {
        /// Dataset directory with pair info and annotation files
        #[arg(long, default_value = "./dataset", env = "ILLUSION_DATA_DIR")]
        data_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            vqa_predictions,
            vg_predictions,
            data_dir,
            save_dir,
            threshold,
            parallel,
            json,
        } => commands::eval::run(
            vqa_predictions,
            vg_predictions,
            data_dir,
            save_dir,
            threshold,
            parallel,
            json,
            cli.verbose,
        ),
        Commands::Info { data_dir } => commands::info::run(data_dir, cli.verbose),
    }
}
