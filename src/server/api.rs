//! Wire types for the HTTP interface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

pub const NOT_AN_OBJECT: &str = "request body must be a JSON object";
pub const MISSING_MESSAGE: &str = "missing 'message' field in request";
pub const MESSAGE_NOT_STRING: &str = "'message' must be a string";
pub const EMPTY_MESSAGE: &str = "'message' must not be empty";
pub const BODY_UNREADABLE: &str = "request body could not be read";
pub const BODY_TOO_LARGE: &str = "request body too large";

/// Validated body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub message: String,
}

impl AnalyzeRequest {
    /// Parse and validate a raw request body.
    ///
    /// Extra fields are ignored. `message` must be a non-empty JSON string.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ApiError::Validation(NOT_AN_OBJECT))?;
        let fields = value
            .as_object()
            .ok_or(ApiError::Validation(NOT_AN_OBJECT))?;

        match fields.get("message") {
            None => Err(ApiError::Validation(MISSING_MESSAGE)),
            Some(Value::String(message)) if message.is_empty() => {
                Err(ApiError::Validation(EMPTY_MESSAGE))
            }
            Some(Value::String(message)) => Ok(Self {
                message: message.clone(),
            }),
            Some(_) => Err(ApiError::Validation(MESSAGE_NOT_STRING)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub emotion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}
