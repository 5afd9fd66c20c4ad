//! Error types for model loading and inference.
//!
//! All fallible model-side operations return [`Result<T>`] which uses
//! [`PipelineError`] as the error type. HTTP-facing errors live in
//! [`crate::server::ApiError`].

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The unified error type for model loading and inference.
///
/// Every variant raised while building a pipeline degrades the service to
/// "not ready". Variants raised by [`crate::pipelines::emotion::Classifier::classify`]
/// become a `500` on the wire.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Model directory or one of its required files does not exist.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Files exist but could not be interpreted (bad config, unsupported architecture).
    #[error("invalid model format: {0}")]
    ModelFormat(String),

    /// Hugging Face Hub failure.
    #[error("{0}")]
    Download(String),

    /// Tokenizer could not be loaded or failed on an input.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure.
    #[error("{0}")]
    Device(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {value}"))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::ModelFormat(value.to_string())
    }
}
