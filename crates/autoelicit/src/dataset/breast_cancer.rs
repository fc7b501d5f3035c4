//! Wisconsin Diagnostic Breast Cancer (WDBC) dataset.
//!
//! Thirty real-valued tumour characteristics computed from digitized images
//! of fine needle aspirates: the mean, standard error, and "worst" value of
//! ten nuclear measurements. The built-in schema needs no file; the feature
//! matrix is read from the UCI `wdbc.data` distribution when one is given.

use std::path::Path;

use crate::error::{ElicitError, Result};

use super::parser::{Parser, ParserConfig};
use super::source::Dataset;

/// Dataset name used in records and logs.
pub const NAME: &str = "breast_cancer";

/// Class labels, indexed by target value.
pub const TARGET_NAMES: [&str; 2] = ["benign", "malignant"];

/// Feature names in canonical column order.
pub const FEATURE_NAMES: [&str; 30] = [
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

/// Owned copy of [`FEATURE_NAMES`].
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// The dataset schema without any rows.
pub fn schema() -> Dataset {
    Dataset::schema_only(NAME, feature_names())
        .with_target_names(TARGET_NAMES.iter().map(|s| s.to_string()).collect())
}

/// Load the full dataset from a UCI `wdbc.data` file.
///
/// Layout: id, diagnosis (`M` or `B`), then the thirty features, no header.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let parser = Parser::with_config(ParserConfig {
        delimiter: Some(b','),
        has_header: false,
        max_rows: None,
    });
    let (table, source) = parser.parse_file(path)?;

    let expected = FEATURE_NAMES.len() + 2;
    if table.column_count() != expected {
        return Err(ElicitError::Config(format!(
            "Expected {} columns in WDBC file, found {}",
            expected,
            table.column_count()
        )));
    }

    let mut data = Vec::with_capacity(table.row_count());
    let mut targets = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let target = match row[1].as_str() {
            "B" => 0,
            "M" => 1,
            other => {
                return Err(ElicitError::Parse {
                    row: row_idx + 1,
                    column: 2,
                    message: format!("unknown diagnosis '{}'", other),
                });
            }
        };
        targets.push(target);

        let values = row[2..]
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.parse::<f64>().map_err(|_| ElicitError::Parse {
                    row: row_idx + 1,
                    column: i + 3,
                    message: format!("'{}' is not a number", cell),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        data.push(values);
    }

    let mut dataset = schema();
    dataset.data = data;
    dataset.targets = targets;
    dataset.source = Some(source);
    Ok(dataset)
}
