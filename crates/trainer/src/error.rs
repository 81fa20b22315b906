//! Trainer error types.

use thiserror::Error;

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, TrainError>;

/// Errors that can occur while splitting, training or evaluating
#[derive(Debug, Error)]
pub enum TrainError {
    /// The requested target column does not exist in the frame
    #[error("Invalid target column")]
    InvalidTarget(String),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model fitting failed
    #[error("Model fitting failed: {0}")]
    Fit(String),

    /// Prediction failed
    #[error("Prediction failed: {0}")]
    Predict(String),

    /// Invalid input data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Plot rasterization or encoding failed
    #[error("Plot rendering failed: {0}")]
    Render(String),

    /// Underlying frame access failure
    #[error(transparent)]
    Dataset(#[from] dataset::DatasetError),
}
