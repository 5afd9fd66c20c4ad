use super::model::TextClassificationModel;
use crate::error::Result;
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

// ============ Output types ============

/// An emotion prediction with label and confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted emotion, taken from the model's `id2label`.
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Output from [`Classifier::classify`].
#[derive(Debug, Clone)]
pub struct Output {
    /// Top-1 prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Classifier ============

/// Object-safe handle to a loaded model, shared across request workers.
pub trait Classifier: Send + Sync {
    /// Classify `text` into the single most likely label.
    fn classify(&self, text: &str) -> Result<Output>;

    /// The fixed label vocabulary, indexed by class id.
    fn labels(&self) -> &[String];
}

// ============ Pipeline ============

/// Tokenizer and classification model bound together.
///
/// Construct with [`EmotionPipelineBuilder`](super::EmotionPipelineBuilder).
pub struct EmotionPipeline<M: TextClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: TextClassificationModel> EmotionPipeline<M> {
    pub fn new(model: M, tokenizer: Tokenizer) -> Self {
        Self { model, tokenizer }
    }

    /// Classify a single text.
    pub fn run(&self, text: &str) -> Result<Output> {
        let stats_builder = PipelineStats::start();
        let prediction = self.model.predict_with_score(&self.tokenizer, text)?;

        Ok(Output {
            prediction,
            stats: stats_builder.finish(),
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: TextClassificationModel> Classifier for EmotionPipeline<M> {
    fn classify(&self, text: &str) -> Result<Output> {
        self.run(text)
    }

    fn labels(&self) -> &[String] {
        self.model.labels().as_slice()
    }
}
