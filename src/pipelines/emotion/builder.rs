use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::model::TextClassificationModel;
use super::pipeline::{Classifier, EmotionPipeline};
use crate::error::Result;
use crate::loaders::{load_tokenizer, ModelFiles, ModelSource};
use crate::models::{Architecture, EmotionModernBertModel, EmotionRobertaModel};
use crate::pipelines::utils::DeviceRequest;

/// Builder for emotion classification pipelines.
///
/// # Examples
///
/// ```rust,no_run
/// # use emotion_service::emotion::EmotionPipelineBuilder;
/// # fn main() -> emotion_service::error::Result<()> {
/// let classifier = EmotionPipelineBuilder::from_dir("final_roberta_emotion_model")
///     .cpu()
///     .build()?;
///
/// let output = classifier.classify("I can't stop smiling today")?;
/// println!("{} ({:.2})", output.prediction.label, output.prediction.score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EmotionPipelineBuilder {
    source: ModelSource,
    device_request: DeviceRequest,
}

impl EmotionPipelineBuilder {
    pub fn new(source: ModelSource) -> Self {
        Self {
            source,
            device_request: DeviceRequest::Cpu,
        }
    }

    /// Load from a local model directory.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(ModelSource::Local(dir.into()))
    }

    /// Load from a Hugging Face Hub repository.
    pub fn from_hub(repo: impl Into<String>) -> Self {
        Self::new(ModelSource::Hub { repo: repo.into() })
    }

    /// Use CPU for inference (default).
    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    /// Use a specific CUDA GPU for inference.
    pub fn cuda(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    pub fn device(mut self, device_request: DeviceRequest) -> Self {
        self.device_request = device_request;
        self
    }

    /// Build the pipeline, picking the architecture from `config.json`'s `model_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing or malformed, the
    /// architecture is unsupported, or device initialization fails.
    pub fn build(self) -> Result<Arc<dyn Classifier>> {
        let files = self.source.resolve()?;
        let (_, artifact) = files.read_config()?;
        let architecture = Architecture::from_model_type(&artifact.model_type)?;
        debug!(%architecture, source = %self.source, "resolved model artifact");

        let classifier: Arc<dyn Classifier> = match architecture {
            Architecture::ModernBert => {
                Arc::new(self.build_from_files::<EmotionModernBertModel>(&files)?)
            }
            Architecture::Roberta => {
                Arc::new(self.build_from_files::<EmotionRobertaModel>(&files)?)
            }
        };
        Ok(classifier)
    }

    /// Build a pipeline for a known architecture.
    pub fn build_with<M: TextClassificationModel>(self) -> Result<EmotionPipeline<M>> {
        let files = self.source.resolve()?;
        self.build_from_files(&files)
    }

    fn build_from_files<M: TextClassificationModel>(
        &self,
        files: &ModelFiles,
    ) -> Result<EmotionPipeline<M>> {
        let device = self.device_request.resolve()?;
        let tokenizer = load_tokenizer(&files.tokenizer)?;
        let model = M::load(files, device)?;

        let pipeline = EmotionPipeline::new(model, tokenizer);
        debug!(
            device = ?pipeline.device(),
            labels = pipeline.model.labels().len(),
            "pipeline ready"
        );
        Ok(pipeline)
    }
}
