//! Loaded datasets and their provenance.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::standardize::Standardizer;

/// Metadata about the file a dataset was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns in the file, target included.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Raw delimited data, every cell still a string.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

/// A classification dataset: ordered feature names, a numeric feature
/// matrix, and optional class labels.
///
/// The matrix may be empty when only the feature schema is known. Elicitation
/// needs nothing but the names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Short dataset name (e.g. "breast_cancer").
    pub name: String,
    /// Feature names in column order.
    pub feature_names: Vec<String>,
    /// Feature values, one inner vector per row, in `feature_names` order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Vec<f64>>,
    /// Class index per row (empty when the dataset has no target).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<usize>,
    /// Class labels; `targets` index into this list.
    #[serde(default)]
    pub target_names: Vec<String>,
    /// Where the data came from, if it was read from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

impl Dataset {
    /// A dataset that carries feature names but no rows.
    pub fn schema_only(name: impl Into<String>, feature_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            feature_names,
            data: Vec::new(),
            targets: Vec::new(),
            target_names: Vec::new(),
            source: None,
        }
    }

    /// Set the class labels.
    pub fn with_target_names(mut self, names: Vec<String>) -> Self {
        self.target_names = names;
        self
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_samples(&self) -> usize {
        self.data.len()
    }

    /// True when the dataset carries feature values, not just names.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// All values of one feature column, or `None` past the last feature.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_features() {
            return None;
        }
        self.data.iter().map(|row| row.get(index).copied()).collect()
    }

    /// A copy with every feature column z-score standardized.
    pub fn standardized(&self) -> Self {
        let scaler = Standardizer::fit(&self.data);
        Self {
            data: scaler.transform(&self.data),
            ..self.clone()
        }
    }

    /// Mapping from class label to index, rendered the way prompts show it
    /// (e.g. `['benign' = 0, 'malignant' = 1]`).
    pub fn target_map_string(&self) -> String {
        let pairs: Vec<String> = self
            .target_names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("'{}' = {}", name, i))
            .collect();
        format!("[{}]", pairs.join(", "))
    }
}
