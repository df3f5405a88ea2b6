//! Error types for illusion-eval operations.

use thiserror::Error;

/// Result type alias for illusion-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A comparison pair references a data ID with no model prediction.
    #[error("Missing {task} prediction for data ID: {id}")]
    MissingPrediction {
        /// Task being evaluated.
        task: String,
        /// Data ID that could not be resolved.
        id: String,
    },

    /// A comparison pair references a data ID with no ground-truth annotation.
    #[error("Missing {task} annotation for data ID: {id}")]
    MissingAnnotation {
        /// Task being evaluated.
        task: String,
        /// Data ID that could not be resolved.
        id: String,
    },

    /// A data ID does not start with an integer illusion index.
    #[error("Malformed data ID (expected \"<index>_...\"): {id}")]
    MalformedId {
        /// The offending data ID.
        id: String,
    },

    /// A data ID's illusion index is outside the category table.
    #[error("Data ID {id} has illusion index {index} outside the category table")]
    UnknownCategory {
        /// The offending data ID.
        id: String,
        /// Index parsed from the ID prefix.
        index: u32,
    },

    /// Error from a model backend during inference.
    #[error("Model error ({model}): {message}")]
    Model {
        /// Model identifier.
        model: String,
        /// Error message from the backend.
        message: String,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
