use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::api::ErrorBody;

/// Every way a request can fail, with a fixed status per variant.
///
/// The `Display` text is the `error` field of the JSON body, so it never
/// carries internal details.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed body or missing/invalid `message`.
    #[error("{0}")]
    Validation(&'static str),

    /// The model failed to load at startup.
    #[error("emotion model could not be loaded")]
    Unavailable,

    /// Tokenization or model execution failed.
    #[error("internal error in emotion service")]
    Inference,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Inference => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Inference.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_message_is_passed_through() {
        assert_eq!(
            ApiError::Validation("missing 'message' field in request").to_string(),
            "missing 'message' field in request"
        );
    }
}
