//! Error types for Agency Assist.
//!
//! This module defines a unified error enum that covers every failure category
//! in the answering pipeline: configuration, I/O, text generation, the
//! official store, the evidence index, reranking and prompts.

use thiserror::Error;

/// Unified error type for Agency Assist.
///
/// Empty lookups and empty retrievals are not errors; they are ordinary
/// values that drive fallback routing. Only provider and infrastructure
/// failures end up here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text-generation provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Official store and answering pipeline errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Evidence index and embedding errors
    #[error("Index error: {0}")]
    Index(String),

    /// Relevance scorer errors
    #[error("Rerank error: {0}")]
    Rerank(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_display_includes_category() {
        let err = AppError::Rerank("score count mismatch".to_string());
        assert_eq!(err.to_string(), "Rerank error: score count mismatch");
    }
}
