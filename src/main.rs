use anyhow::{Context, Result};
use clap::Parser;

use emotion_service::config::ServiceConfig;
use emotion_service::emotion::EmotionPipelineBuilder;
use emotion_service::logging;
use emotion_service::server::{self, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::parse();
    logging::init(config.log_format);

    let builder = EmotionPipelineBuilder::new(config.model_source()).device(config.device);
    let state = AppState::load(builder);

    server::run(&config, state)
        .await
        .with_context(|| format!("failed to serve on {}:{}", config.host, config.port))
}
