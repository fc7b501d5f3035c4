//! Elicit command - query an LLM for priors and print the prior array.

use std::path::{Path, PathBuf};

use autoelicit::llm::build_client;
use autoelicit::{Elicitor, ProviderKind};
use colored::Colorize;
use tracing::info;

use crate::cli::DatasetArgs;

/// Command-line values that take precedence over the config file.
pub struct Overrides {
    pub dataset: DatasetArgs,
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub seed: Option<u64>,
    pub max_attempts: Option<u32>,
}

pub fn run(
    config_path: Option<&Path>,
    overrides: Overrides,
    show_mixture: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path, &overrides.dataset)?;

    if let Some(provider) = overrides.provider {
        config.provider = provider;
    }
    if let Some(model) = overrides.model {
        config.llm.model = model;
    }
    if let Some(temperature) = overrides.temperature {
        config.llm.temperature = temperature;
    }
    if overrides.seed.is_some() {
        config.llm.seed = overrides.seed;
    }
    if let Some(max_attempts) = overrides.max_attempts {
        config.elicitation.retry.max_attempts = max_attempts;
    }
    config.elicitation.verbose = verbose;

    let dataset = super::load_dataset(&config)?;
    let system_roles = config.prompts.system_roles();
    let user_roles = config.prompts.user_roles();

    let client = build_client(config.provider, config.llm.clone(), &dataset.feature_names)?;

    eprintln!(
        "{} {} prompt pairs x {} features with {} ({})",
        "Eliciting".cyan().bold(),
        system_roles.len() * user_roles.len(),
        dataset.n_features(),
        client.name().white().bold(),
        client.config().model
    );

    let mut elicitor = Elicitor::with_options(client.as_ref(), config.elicitation.clone());
    let record = elicitor.run(&system_roles, &user_roles, &dataset.feature_names)?;
    let priors = &record.priors;

    let (pairs, features, last) = priors.shape();
    println!("The shape of the prior is: ({}, {}, {})", pairs, features, last);
    println!("The priors are:\n{}", priors);

    if show_mixture {
        println!();
        println!("{}", "Mixture of elicited priors:".yellow().bold());
        let width = dataset
            .feature_names
            .iter()
            .map(|n| n.len())
            .max()
            .unwrap_or_default();
        for (name, prior) in dataset.feature_names.iter().zip(priors.mixture()) {
            let mean = format!("{:>8.3}", prior.mean);
            let mean = if prior.mean >= 0.0 { mean.red() } else { mean.blue() };
            println!("  {:width$}  mean {}  std {:>7.3}", name, mean, prior.std, width = width);
        }
    }

    if let Some(path) = output {
        record.save(&path)?;
        info!(path = %path.display(), attempts = ?record.attempts, "saved elicitation record");
        eprintln!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
