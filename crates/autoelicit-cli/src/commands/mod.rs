//! CLI command implementations.

pub mod elicit;
pub mod features;
pub mod prompts;

use std::path::Path;

use autoelicit::config::{DatasetConfig, DatasetKind};
use autoelicit::{Dataset, ElicitConfig};
use tracing::{debug, info};

use crate::cli::DatasetArgs;

/// Load the config file, then let `--data`/`--target` replace its dataset.
pub fn load_config(
    path: Option<&Path>,
    dataset: &DatasetArgs,
) -> Result<ElicitConfig, Box<dyn std::error::Error>> {
    let mut config = ElicitConfig::discover(path)?;
    debug!(config = ?path, provider = %config.provider, "configuration loaded");

    if let Some(ref data) = dataset.data {
        if !data.exists() {
            return Err(format!("File not found: {}", data.display()).into());
        }
        let kind = if dataset.target.is_some() {
            DatasetKind::Delimited
        } else {
            DatasetKind::BreastCancer
        };
        info!(data = %data.display(), ?kind, "dataset overridden from command line");
        config.dataset = DatasetConfig {
            kind,
            path: Some(data.clone()),
            target: dataset.target.clone(),
        };
    }

    Ok(config)
}

/// Load the configured dataset.
pub fn load_dataset(config: &ElicitConfig) -> Result<Dataset, Box<dyn std::error::Error>> {
    let dataset = config.dataset.load()?;
    debug!(
        name = %dataset.name,
        features = dataset.n_features(),
        samples = dataset.n_samples(),
        "dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_data_with_target_selects_delimited_dataset() {
        let config_file = write_file("provider = \"mock\"\n");
        let data = write_file("x,y,label\n1,2,a\n3,4,b\n");
        let args = DatasetArgs {
            data: Some(data.path().to_path_buf()),
            target: Some("label".to_string()),
        };

        let config = load_config(Some(config_file.path()), &args).unwrap();
        assert_eq!(config.dataset.kind, DatasetKind::Delimited);

        let dataset = load_dataset(&config).unwrap();
        assert_eq!(dataset.feature_names, vec!["x", "y"]);
        assert_eq!(dataset.target_names, vec!["a", "b"]);
    }

    #[test]
    fn test_without_data_uses_breast_cancer_schema() {
        let config_file = write_file("");
        let config = load_config(Some(config_file.path()), &DatasetArgs::default()).unwrap();

        let dataset = load_dataset(&config).unwrap();
        assert_eq!(dataset.n_features(), 30);
        assert!(!dataset.has_data());
    }

    #[test]
    fn test_missing_data_file_is_error() {
        let config_file = write_file("");
        let args = DatasetArgs {
            data: Some("/nonexistent/wdbc.data".into()),
            target: None,
        };
        assert!(load_config(Some(config_file.path()), &args).is_err());
    }
}
