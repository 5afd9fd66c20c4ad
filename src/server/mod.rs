//! HTTP interface.
//!
//! One immutable [`AppState`] is built at startup and shared with every
//! worker through [`web::Data`]. It never changes afterwards, so request
//! handling takes no locks.

pub mod api;
mod error;
pub mod handlers;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Instant;

use actix_web::{web, App, HttpServer};
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::emotion::{Classifier, EmotionPipelineBuilder};

/// Startup snapshot: the loaded classifier, if loading succeeded.
///
/// The readiness flag is `classifier.is_some()` and is fixed for the
/// lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    classifier: Option<Arc<dyn Classifier>>,
}

impl AppState {
    pub fn ready(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    pub fn unavailable() -> Self {
        Self { classifier: None }
    }

    /// Load the model once. A failure is logged and yields an unavailable
    /// state instead of aborting startup.
    pub fn load(builder: EmotionPipelineBuilder) -> Self {
        let start = Instant::now();
        info!(?builder, "loading emotion model");

        match builder.build() {
            Ok(classifier) => {
                info!(
                    elapsed_secs = start.elapsed().as_secs_f64(),
                    labels = ?classifier.labels(),
                    "emotion model loaded"
                );
                Self::ready(classifier)
            }
            Err(e) => {
                error!(error = %e, "failed to load emotion model, /analyze will answer 503");
                Self::unavailable()
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        self.classifier.as_ref()
    }
}

/// Register the service's routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::analyze).service(handlers::health);
}

/// Bind and serve until the server is stopped.
pub async fn run(config: &ServiceConfig, state: AppState) -> std::io::Result<()> {
    let ready = state.is_ready();
    let data = web::Data::new(state);

    let mut server =
        HttpServer::new(move || App::new().app_data(data.clone()).configure(configure));
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let server = server.bind(config.bind_addr())?;
    info!(
        host = %config.host,
        port = config.port,
        model_loaded = ready,
        "emotion service listening"
    );

    server.run().await
}
