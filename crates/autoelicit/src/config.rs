//! Run configuration loaded from `autoelicit.toml`.
//!
//! Every section is optional. A minimal file:
//!
//! ```toml
//! provider = "qwen"
//!
//! [llm]
//! temperature = 0.2
//! seed = 7
//!
//! [elicitation.retry]
//! max_attempts = 5
//! ```
//!
//! API keys are never read from this file, only from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{breast_cancer, Dataset};
use crate::elicit::ElicitOptions;
use crate::error::{ElicitError, Result};
use crate::llm::{LlmConfig, ProviderKind};
use crate::prompt::{self, PromptTemplate};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "autoelicit.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElicitConfig {
    pub provider: ProviderKind,
    pub llm: LlmConfig,
    pub elicitation: ElicitOptions,
    pub prompts: PromptConfig,
    pub dataset: DatasetConfig,
}

/// Prompt overrides. Empty lists fall back to the built-in breast cancer roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub system_roles: Vec<PromptTemplate>,
    pub user_roles: Vec<PromptTemplate>,
}

impl PromptConfig {
    pub fn system_roles(&self) -> Vec<PromptTemplate> {
        if self.system_roles.is_empty() {
            prompt::breast_cancer::system_roles()
        } else {
            self.system_roles.clone()
        }
    }

    pub fn user_roles(&self) -> Vec<PromptTemplate> {
        if self.user_roles.is_empty() {
            prompt::breast_cancer::user_roles()
        } else {
            self.user_roles.clone()
        }
    }
}

/// How the dataset file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// UCI `wdbc.data`; without a path only the feature schema is used.
    #[default]
    BreastCancer,
    /// Any CSV/TSV with a header row.
    Delimited,
}

/// Which dataset supplies the feature names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    pub path: Option<PathBuf>,
    /// Label column for delimited files.
    pub target: Option<String>,
}

impl DatasetConfig {
    pub fn load(&self) -> Result<Dataset> {
        match (self.kind, &self.path) {
            (DatasetKind::BreastCancer, None) => Ok(breast_cancer::schema()),
            (DatasetKind::BreastCancer, Some(path)) => breast_cancer::load(path),
            (DatasetKind::Delimited, Some(path)) => {
                Dataset::from_delimited(path, self.target.as_deref())
            }
            (DatasetKind::Delimited, None) => Err(ElicitError::Config(
                "a delimited dataset needs a path".to_string(),
            )),
        }
    }
}

impl ElicitConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ElicitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&text)
    }

    /// Load `path` if given, else `autoelicit.toml` from the working
    /// directory if present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
