use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use futures::future::join_all;
use serde_json::{json, Value};

use emotion_service::emotion::{Classifier, Output, PipelineStats, Prediction};
use emotion_service::error::{PipelineError, Result};
use emotion_service::server::api::{AnalyzeResponse, ErrorBody, HealthResponse};
use emotion_service::server::handlers::MAX_BODY_BYTES;
use emotion_service::server::{configure, AppState};

const LABELS: [&str; 5] = ["joy", "sadness", "anger", "fear", "neutral"];

/// Deterministic stand-in: picks a label from the text's length and counts calls.
struct LengthClassifier {
    calls: AtomicUsize,
    labels: Vec<String>,
}

impl LengthClassifier {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            labels: LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn label_for(&self, text: &str) -> &str {
        &self.labels[text.chars().count() % self.labels.len()]
    }
}

impl Classifier for LengthClassifier {
    fn classify(&self, text: &str) -> Result<Output> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Output {
            prediction: Prediction {
                label: self.label_for(text).to_string(),
                score: 0.9,
            },
            stats: PipelineStats {
                total_time: Duration::from_millis(1),
            },
        })
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Fails on any input containing "boom".
struct FlakyClassifier {
    inner: LengthClassifier,
}

impl Classifier for FlakyClassifier {
    fn classify(&self, text: &str) -> Result<Output> {
        if text.contains("boom") {
            return Err(PipelineError::Unexpected("forced failure".into()));
        }
        self.inner.classify(text)
    }

    fn labels(&self) -> &[String] {
        self.inner.labels()
    }
}

/// Panics inside the blocking task.
struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn classify(&self, _text: &str) -> Result<Output> {
        panic!("model exploded")
    }

    fn labels(&self) -> &[String] {
        &[]
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure),
        )
        .await
    };
}

fn analyze(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/analyze")
        .set_json(body)
}

#[actix_web::test]
async fn valid_message_returns_label() {
    let classifier = Arc::new(LengthClassifier::new());
    let app = app!(AppState::ready(classifier.clone()));

    let resp = test::call_service(
        &app,
        analyze(json!({"message": "I feel great"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 1);
    let emotion = fields["emotion"].as_str().unwrap();
    assert!(LABELS.contains(&emotion));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn missing_message_is_rejected_without_inference() {
    let classifier = Arc::new(LengthClassifier::new());
    let app = app!(AppState::ready(classifier.clone()));

    for body in [json!({}), json!({"text": "hi"})] {
        let resp = test::call_service(&app, analyze(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn malformed_bodies_are_rejected() {
    let classifier = Arc::new(LengthClassifier::new());
    let app = app!(AppState::ready(classifier.clone()));

    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post().uri("/analyze").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for body in [json!({"message": ""}), json!({"message": 3}), json!(["hi"])] {
        let resp = test::call_service(&app, analyze(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn oversized_body_is_rejected() {
    let classifier = Arc::new(LengthClassifier::new());
    let app = app!(AppState::ready(classifier.clone()));

    let message = "a".repeat(MAX_BODY_BYTES + 1);
    let resp = test::call_service(&app, analyze(json!({ "message": message })).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn unloaded_model_answers_503_for_any_body() {
    let app = app!(AppState::unavailable());

    let bodies = [
        json!({"message": "hello"}),
        json!({}),
        json!({"text": "hi"}),
        json!(null),
    ];
    for body in bodies {
        let resp = test::call_service(&app, analyze(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_payload("garbage")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn inference_failure_is_500_and_service_survives() {
    let classifier = Arc::new(FlakyClassifier {
        inner: LengthClassifier::new(),
    });
    let app = app!(AppState::ready(classifier));

    let resp = test::call_service(&app, analyze(json!({"message": "boom"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(!body.error.contains("forced failure"));

    let resp = test::call_service(&app, analyze(json!({"message": "fine"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn panicking_inference_is_500() {
    let app = app!(AppState::ready(Arc::new(PanickingClassifier)));

    let resp = test::call_service(&app, analyze(json!({"message": "hi"})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(!body.error.is_empty());
}

#[actix_web::test]
async fn same_message_gives_same_label() {
    let app = app!(AppState::ready(Arc::new(LengthClassifier::new())));

    let mut labels = Vec::new();
    for _ in 0..2 {
        let resp: AnalyzeResponse = test::call_and_read_body_json(
            &app,
            analyze(json!({"message": "the same words"})).to_request(),
        )
        .await;
        labels.push(resp.emotion);
    }
    assert_eq!(labels[0], labels[1]);
}

#[actix_web::test]
async fn concurrent_requests_get_their_own_answers() {
    let classifier = Arc::new(LengthClassifier::new());
    let app = app!(AppState::ready(classifier.clone()));

    let messages: Vec<String> = (1..=20).map(|n| "x".repeat(n)).collect();
    let responses = join_all(messages.iter().map(|message| {
        test::call_service(&app, analyze(json!({ "message": message })).to_request())
    }))
    .await;

    for (message, resp) in messages.iter().zip(responses) {
        assert_eq!(resp.status(), StatusCode::OK);
        let body: AnalyzeResponse = test::read_body_json(resp).await;
        assert_eq!(body.emotion, classifier.label_for(message));
    }
    assert_eq!(classifier.calls.load(Ordering::SeqCst), messages.len());
}

#[actix_web::test]
async fn health_reflects_readiness() {
    let app = app!(AppState::ready(Arc::new(LengthClassifier::new())));
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: HealthResponse = test::read_body_json(resp).await;
    assert!(body.model_loaded);

    let app = app!(AppState::unavailable());
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: HealthResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, "unavailable");
    assert!(!body.model_loaded);
}
