//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use autoelicit::ProviderKind;

/// autoelicit: elicit logistic regression priors from LLMs
#[derive(Parser)]
#[command(name = "autoelicit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log prompts and each elicited prior
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./autoelicit.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query an LLM for a prior on every feature and print the prior array
    Elicit {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// LLM provider (openai, anthropic, ollama, llama, qwen, deepseek, mock)
        #[arg(short, long)]
        provider: Option<ProviderKind>,

        /// Model to use (provider-specific, e.g., "gpt-3.5-turbo", "qwen2.5:7b")
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Seed for the backend and for retry jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Attempts per prompt pair before giving up
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Also print the per-feature mixture of the elicited priors
        #[arg(long)]
        mixture: bool,

        /// Write the full run (prompts, settings, priors) as JSON
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the dataset's feature names
    Features {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Show z-score statistics (requires feature data)
        #[arg(long)]
        stats: bool,
    },

    /// Print the rendered prompt pairs without contacting an LLM
    Prompts {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where feature names come from.
#[derive(Args, Clone, Debug, Default)]
pub struct DatasetArgs {
    /// Data file: UCI wdbc.data, or any CSV/TSV when --target is given
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Label column of a CSV/TSV data file
    #[arg(long, requires = "data")]
    pub target: Option<String>,
}
