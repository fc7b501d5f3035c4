//! Features command - list the dataset's feature names.

use std::path::Path;

use autoelicit::dataset::Standardizer;
use colored::Colorize;

use crate::cli::DatasetArgs;

pub fn run(
    config_path: Option<&Path>,
    dataset_args: DatasetArgs,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, &dataset_args)?;
    let dataset = super::load_dataset(&config)?;

    println!(
        "{} {} ({} features, {} samples)",
        "Dataset".cyan().bold(),
        dataset.name.white().bold(),
        dataset.n_features(),
        dataset.n_samples()
    );
    if !dataset.target_names.is_empty() {
        println!("Targets: {}", dataset.target_map_string());
    }
    if let Some(ref source) = dataset.source {
        println!("Source: {} ({})", source.path.display(), source.hash);
    }
    println!();

    if stats && !dataset.has_data() {
        return Err("--stats needs feature data; pass --data <FILE>".into());
    }

    if stats {
        let scaler = Standardizer::fit(&dataset.data);
        println!("  {:>3}  {:30} {:>12} {:>12}", "#", "feature", "mean", "std");
        for (i, name) in dataset.feature_names.iter().enumerate() {
            println!(
                "  {:>3}  {:30} {:>12.4} {:>12.4}",
                i, name, scaler.means[i], scaler.stds[i]
            );
        }
    } else {
        for (i, name) in dataset.feature_names.iter().enumerate() {
            println!("  {:>3}  {}", i, name);
        }
    }

    Ok(())
}
