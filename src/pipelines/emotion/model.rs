use crate::error::Result;
use crate::loaders::ModelFiles;
use crate::models::LabelSet;
use tokenizers::Tokenizer;

use super::pipeline::Prediction;

pub trait TextClassificationModel: Send + Sync {
    fn load(files: &ModelFiles, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Top-1 label with its softmax probability.
    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction>;

    fn labels(&self) -> &LabelSet;

    fn device(&self) -> &candle_core::Device;
}
