//! Prompts command - show the prompt pairs an elicitation run would send.

use std::path::Path;

use autoelicit::PromptPair;
use colored::Colorize;

use crate::cli::DatasetArgs;

pub fn run(
    config_path: Option<&Path>,
    dataset_args: DatasetArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, &dataset_args)?;
    let dataset = super::load_dataset(&config)?;

    let pairs = PromptPair::all(
        &config.prompts.system_roles(),
        &config.prompts.user_roles(),
        &dataset.feature_names,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    for pair in &pairs {
        println!(
            "{}",
            format!(
                "Prompt pair {} (system {}, user {})",
                pair.index, pair.system_index, pair.user_index
            )
            .yellow()
            .bold()
        );
        println!("{}", "[system]".dimmed());
        println!("{}", pair.system);
        println!("{}", "[user]".dimmed());
        println!("{}", pair.user);
        println!();
    }

    Ok(())
}
