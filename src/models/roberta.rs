use candle_core::Device;
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaForSequenceClassification};
use tokenizers::Tokenizer;

use super::{encode, encoding_tensors, load_var_builder, top1, LabelSet};
use crate::error::Result;
use crate::loaders::ModelFiles;
use crate::pipelines::emotion::model::TextClassificationModel;
use crate::pipelines::emotion::Prediction;

/// RoBERTa (or XLM-RoBERTa) encoder with a sequence-classification head.
///
/// Both share the `roberta.*` / `classifier.*` weight layout of a
/// `RobertaForSequenceClassification` export.
pub struct EmotionRobertaModel {
    model: XLMRobertaForSequenceClassification,
    device: Device,
    labels: LabelSet,
}

impl EmotionRobertaModel {
    pub fn new(files: &ModelFiles, device: Device) -> Result<Self> {
        let (raw, artifact) = files.read_config()?;
        let labels = LabelSet::from_id2label(&artifact.id2label)?;
        let config: Config = serde_json::from_str(&raw)?;

        let vb = load_var_builder(&files.weights, &device)?;
        Self::from_var_builder(&config, vb, labels, device)
    }

    pub(crate) fn from_var_builder(
        config: &Config,
        vb: VarBuilder,
        labels: LabelSet,
        device: Device,
    ) -> Result<Self> {
        let model = XLMRobertaForSequenceClassification::new(labels.len(), config, vb)?;
        Ok(Self {
            model,
            device,
            labels,
        })
    }

    pub fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        let encoding = encode(tokenizer, text)?;
        let (input_ids, attention_mask) = encoding_tensors(&encoding, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;
        top1(&logits, &self.labels)
    }
}

impl TextClassificationModel for EmotionRobertaModel {
    fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        EmotionRobertaModel::new(files, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        self.predict_with_score(tokenizer, text)
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
