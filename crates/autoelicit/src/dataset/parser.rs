//! Delimited-file reader with delimiter detection.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ElicitError, Result};
use super::source::{DataTable, Dataset, SourceMetadata};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the first row holds column names.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
        }
    }
}

/// Reads CSV/TSV files into string tables and numeric datasets.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Read a file into a string table, recording its provenance.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| ElicitError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };
        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            format = %format,
            "parsed delimited file"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Read a file into a numeric [`Dataset`].
    ///
    /// Every column except `target` must be numeric. Target labels are sorted
    /// and numbered from zero.
    pub fn load_dataset(
        &self,
        path: impl AsRef<Path>,
        name: impl Into<String>,
        target: Option<&str>,
    ) -> Result<Dataset> {
        let (table, source) = self.parse_file(path)?;
        let target_index = match target {
            Some(t) => Some(table.column_index(t).ok_or_else(|| {
                ElicitError::Config(format!("Target column '{}' not found", t))
            })?),
            None => None,
        };
        let mut dataset = table_to_dataset(&table, name.into(), target_index)?;
        dataset.source = Some(source);
        Ok(dataset)
    }

    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            let record = result?;
            if !self.config.has_header && headers.is_empty() {
                headers = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
            }

            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if headers.is_empty() {
            return Err(ElicitError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(ElicitError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Read a CSV/TSV file with a header row, named after the file stem.
    pub fn from_delimited(path: impl AsRef<Path>, target: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        Parser::new().load_dataset(path, name, target)
    }
}

/// Convert a string table into a numeric dataset.
pub(crate) fn table_to_dataset(
    table: &DataTable,
    name: String,
    target_index: Option<usize>,
) -> Result<Dataset> {
    let feature_cols: Vec<usize> = (0..table.column_count())
        .filter(|&c| Some(c) != target_index)
        .collect();
    let feature_names = feature_cols.iter().map(|&c| table.headers[c].clone()).collect();

    let mut data = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut values = Vec::with_capacity(feature_cols.len());
        for &col in &feature_cols {
            let cell = row[col].as_str();
            let value: f64 = cell.parse().map_err(|_| ElicitError::Parse {
                row: row_idx + 1,
                column: col + 1,
                message: format!("'{}' is not a number", cell),
            })?;
            values.push(value);
        }
        data.push(values);
    }

    let (targets, target_names) = match target_index {
        Some(t) => {
            let labels: BTreeSet<&str> = table.rows.iter().map(|r| r[t].as_str()).collect();
            let target_names: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
            let targets = table
                .rows
                .iter()
                .map(|r| target_names.iter().position(|n| n == &r[t]).unwrap_or_default())
                .collect();
            (targets, target_names)
        }
        None => (Vec::new(), Vec::new()),
    };

    Ok(Dataset {
        name,
        feature_names,
        data,
        targets,
        target_names,
        source: None,
    })
}

/// Pick the delimiter that splits the first lines most consistently.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ElicitError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0usize);
    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();
        let first = counts[0];
        if first == 0 {
            continue;
        }

        // Tab gets a small bonus: it rarely appears inside values.
        let score = if counts.iter().all(|&c| c == first) {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first
        };
        if score > best.1 {
            best = (delim, score);
        }
    }

    Ok(best.0)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut in_quotes = false;
    line.chars()
        .filter(|&ch| {
            if ch == '"' {
                in_quotes = !in_quotes;
            }
            ch == delim_char && !in_quotes
        })
        .count()
}
