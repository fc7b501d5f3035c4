//! autoelicit CLI - elicit logistic regression priors from LLMs.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // API keys may live in a .env file.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "autoelicit=info"
    } else {
        "autoelicit=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Elicit {
            dataset,
            provider,
            model,
            temperature,
            seed,
            max_attempts,
            mixture,
            output,
        } => commands::elicit::run(
            config,
            commands::elicit::Overrides {
                dataset,
                provider,
                model,
                temperature,
                seed,
                max_attempts,
            },
            mixture,
            output,
            cli.verbose,
        ),

        Commands::Features { dataset, stats } => commands::features::run(config, dataset, stats),

        Commands::Prompts { dataset, json } => commands::prompts::run(config, dataset, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
