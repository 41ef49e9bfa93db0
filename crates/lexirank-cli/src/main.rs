//! The `lexirank` binary.
//!
//! Runs an interactive adaptive test, a fixed-interval test, a simulated
//! respondent, or rank normalization of a vocabulary file.

mod config;
mod normalize;
mod report;
mod stdin_collector;

use clap::{Parser, Subcommand};
use lexirank_curve::{estimate, group_scores, CurveConfig};
use lexirank_search::{run_fixed_interval, AdaptiveSearch, SearchOutcome, SimulatedRespondent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, load_vocabulary};
use crate::report::TestReport;
use crate::stdin_collector::StdinCollector;

#[derive(Parser)]
#[command(name = "lexirank", about = "Lexirank: adaptive vocabulary size estimation")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "lexirank.toml")]
    config: PathBuf,

    /// Vocabulary JSON (overrides config)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive adaptive test
    Test {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Test every N-th word and report mean scores per rank group
    Fixed {
        /// Rank distance between tested words
        #[arg(long)]
        interval: u32,
        /// Number of words to test
        #[arg(long)]
        count: u32,
        /// Ranks per reported group
        #[arg(long)]
        group_size: u32,
    },
    /// Run the adaptive test against a simulated respondent
    Simulate {
        /// Highest rank answered "I know it"
        #[arg(long)]
        known_up_to: u32,
        /// Highest rank answered "I recognize it" (defaults to --known-up-to)
        #[arg(long)]
        partial_up_to: Option<u32>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a {word: rank} file with gaps as ranks 1..N
    Normalize {
        input: PathBuf,
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config).await?;
    if let Some(path) = cli.vocabulary {
        config.vocabulary = path;
    }

    match cli.command {
        Commands::Test { json } => {
            let vocabulary = load_vocabulary(&config.vocabulary).await?;
            let collector = StdinCollector::new(config.input.clone());
            eprintln!("{}", report::INSTRUCTIONS);

            let outcome = AdaptiveSearch::new(config.search.clone(), &vocabulary, &collector)?
                .run()
                .await?;
            print_outcome(&outcome, &config.curve, json)?;
        }
        Commands::Fixed {
            interval,
            count,
            group_size,
        } => {
            let vocabulary = load_vocabulary(&config.vocabulary).await?;
            let collector = StdinCollector::new(config.input.clone());
            eprintln!("{}", report::INSTRUCTIONS);

            let session = run_fixed_interval(&vocabulary, &collector, interval, count).await?;
            let groups = group_scores(&session.scores, group_size);
            print!("{}", report::format_groups(&groups));
        }
        Commands::Simulate {
            known_up_to,
            partial_up_to,
            json,
        } => {
            let vocabulary = Arc::new(load_vocabulary(&config.vocabulary).await?);
            let partial_up_to = partial_up_to.unwrap_or(known_up_to).max(known_up_to);
            let respondent =
                SimulatedRespondent::threshold(vocabulary.clone(), known_up_to, partial_up_to);

            let outcome = AdaptiveSearch::new(config.search.clone(), &vocabulary, &respondent)?
                .run()
                .await?;
            info!(
                known_up_to,
                partial_up_to,
                prompts = respondent.prompts(),
                "Simulation finished"
            );
            print_outcome(&outcome, &config.curve, json)?;
        }
        Commands::Normalize { input, output } => {
            let words = normalize::normalize_file(&input, &output).await?;
            println!("Wrote {} words to {}", words, output.display());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, curve: &CurveConfig, json: bool) -> anyhow::Result<()> {
    let result = estimate(&outcome.session.scores, curve);
    if json {
        let report = TestReport::new(&result, outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::format_chunks(outcome));
        println!();
        print!("{}", report::format_estimate(&result));
    }
    Ok(())
}
