//! Service configuration.
//!
//! Every flag can also be set through an environment variable. Priority is
//! CLI arguments > environment variables > defaults. The defaults reproduce
//! the fixed interface: all interfaces, port 5000, model directory
//! `final_roberta_emotion_model`.

use clap::Parser;
use std::path::PathBuf;

use crate::loaders::ModelSource;
use crate::logging::LogFormat;
use crate::pipelines::utils::DeviceRequest;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_DIR: &str = "final_roberta_emotion_model";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "emotion-service",
    version,
    about = "Classify the dominant emotion of a text message over HTTP"
)]
pub struct ServiceConfig {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "EMOTION_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[arg(long, env = "EMOTION_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding config.json, tokenizer.json and the weights
    #[arg(long, env = "EMOTION_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Hugging Face Hub repository to load instead of --model-dir
    #[arg(long, env = "EMOTION_MODEL_REPO")]
    pub model_repo: Option<String>,

    /// Inference device: cpu, cuda or cuda:N
    #[arg(long, env = "EMOTION_DEVICE", default_value = "cpu")]
    pub device: DeviceRequest,

    /// Number of HTTP worker threads (defaults to one per physical core)
    #[arg(long, env = "EMOTION_WORKERS")]
    pub workers: Option<usize>,

    /// Log line format
    #[arg(long, value_enum, env = "EMOTION_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServiceConfig {
    pub fn model_source(&self) -> ModelSource {
        match &self.model_repo {
            Some(repo) => ModelSource::Hub { repo: repo.clone() },
            None => ModelSource::Local(self.model_dir.clone()),
        }
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
