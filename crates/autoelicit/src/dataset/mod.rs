//! Dataset loading: feature names, feature matrices, and standardization.

pub mod breast_cancer;
mod parser;
mod source;
mod standardize;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, Dataset, SourceMetadata};
pub use standardize::Standardizer;
