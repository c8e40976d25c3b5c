//! Store error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(String),

    #[error("Arrow error: {0}")]
    Arrow(String),

    #[error("Dataset is missing the '{0}' column")]
    MissingColumn(String),

    #[error("Column '{column}' has unexpected type: {datatype}")]
    ColumnType { column: String, datatype: String },

    #[error("Column '{column}' contains null values")]
    NullValue { column: String },

    #[error("Gene '{symbol}' covers {actual} cell types, expected {expected}")]
    ShapeMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate gene column: {0}")]
    DuplicateGene(String),
}

impl From<parquet::errors::ParquetError> for StoreError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        StoreError::Parquet(err.to_string())
    }
}

impl From<arrow::error::ArrowError> for StoreError {
    fn from(err: arrow::error::ArrowError) -> Self {
        StoreError::Arrow(err.to_string())
    }
}
