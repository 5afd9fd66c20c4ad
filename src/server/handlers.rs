use actix_web::{get, post, web, HttpResponse};
use tracing::{error, info};

use super::api::{
    AnalyzeRequest, AnalyzeResponse, HealthResponse, BODY_TOO_LARGE, BODY_UNREADABLE,
};
use super::error::ApiError;
use super::AppState;

/// Bodies above this are rejected before parsing.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

const PREVIEW_CHARS: usize = 30;

/// `POST /analyze`: classify the dominant emotion of `message`.
///
/// Readiness is checked before the body is read, so an unloaded model
/// answers 503 whatever the request contains.
#[post("/analyze")]
pub async fn analyze(
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let classifier = state.classifier().cloned().ok_or(ApiError::Unavailable)?;

    let body = read_body(payload).await?;
    let AnalyzeRequest { message } = AnalyzeRequest::from_body(&body)?;
    let preview = preview(&message);

    // Inference is CPU-bound, keep it off the async workers.
    let output = web::block(move || classifier.classify(&message))
        .await
        .map_err(|e| {
            error!(error = %e, "inference task did not complete");
            ApiError::Inference
        })?
        .map_err(|e| {
            error!(error = %e, message = %preview, "inference failed");
            ApiError::Inference
        })?;

    info!(
        message = %preview,
        emotion = %output.prediction.label,
        score = output.prediction.score,
        elapsed_ms = output.stats.total_time.as_secs_f64() * 1000.0,
        "message analyzed"
    );

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        emotion: output.prediction.label,
    }))
}

/// `GET /health`: 200 when the model is loaded, 503 otherwise.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    if state.is_ready() {
        HttpResponse::Ok().json(HealthResponse {
            status: "ok".into(),
            model_loaded: true,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "unavailable".into(),
            model_loaded: false,
        })
    }
}

async fn read_body(payload: web::Payload) -> Result<web::Bytes, ApiError> {
    payload
        .to_bytes_limited(MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::Validation(BODY_TOO_LARGE))?
        .map_err(|_| ApiError::Validation(BODY_UNREADABLE))
}

/// First characters of a message for log lines.
fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
