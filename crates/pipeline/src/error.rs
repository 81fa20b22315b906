//! Pipeline error types.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur during preprocessing
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The requested target column does not exist in the frame
    #[error("Invalid target column")]
    InvalidTarget(String),

    /// A step was asked to transform before it was fitted
    #[error("Scaler '{0}' applied before fit")]
    NotFitted(String),

    /// Underlying frame access failure (unknown or non-numeric column)
    #[error(transparent)]
    Dataset(#[from] dataset::DatasetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_message_matches_contract() {
        let error = PipelineError::InvalidTarget("label".to_string());
        assert_eq!(error.to_string(), "Invalid target column");
    }

    #[test]
    fn dataset_errors_pass_through() {
        let error = PipelineError::from(dataset::DatasetError::NotNumeric("city".to_string()));
        assert_eq!(error.to_string(), "Invalid data: column 'city' is not numeric");
    }
}
