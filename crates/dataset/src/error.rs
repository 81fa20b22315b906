//! Dataset error types.

use thiserror::Error;

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors that can occur while parsing or accessing tabular data
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying CSV reader failure (ragged rows, bad UTF-8, IO)
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    /// Payload had no header row
    #[error("CSV read failed: empty file")]
    EmptyFile,

    /// Header row present but no data rows followed
    #[error("CSV read failed: no data rows")]
    NoRows,

    /// Two columns share a name
    #[error("CSV read failed: duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A named column does not exist in the frame
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// A numeric operation was applied to a text column
    #[error("Invalid data: column '{0}' is not numeric")]
    NotNumeric(String),

    /// Generic shape violation (row-count mismatch on write-back)
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_message() {
        assert_eq!(
            DatasetError::EmptyFile.to_string(),
            "CSV read failed: empty file"
        );
    }

    #[test]
    fn duplicate_column_message() {
        let error = DatasetError::DuplicateColumn("age".to_string());
        assert_eq!(error.to_string(), "CSV read failed: duplicate column 'age'");
    }

    #[test]
    fn not_numeric_message() {
        let error = DatasetError::NotNumeric("city".to_string());
        assert_eq!(error.to_string(), "Invalid data: column 'city' is not numeric");
    }

    #[test]
    fn implements_std_error() {
        fn assert_std_error<E: std::error::Error>() {}
        assert_std_error::<DatasetError>();
    }
}
