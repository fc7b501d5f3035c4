//! A completed elicitation run, ready to print or save.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ElicitError, Result};
use crate::prompt::PromptPair;

use super::prior::PriorArray;

/// Everything needed to reproduce or audit one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElicitationRecord {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
    pub seed: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    /// Rendered prompts, in elicitation order.
    pub prompts: Vec<PromptPair>,
    /// Attempts used per prompt pair.
    pub attempts: Vec<u32>,
    pub priors: PriorArray,
}

impl ElicitationRecord {
    /// Write the record as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ElicitError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
