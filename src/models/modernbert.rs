use candle_core::Device;
use candle_transformers::models::modernbert::{
    ClassifierConfig, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use std::collections::HashMap;
use tokenizers::Tokenizer;

use super::{encode, encoding_tensors, load_var_builder, top1, LabelSet};
use crate::error::Result;
use crate::loaders::ModelFiles;
use crate::pipelines::emotion::model::TextClassificationModel;
use crate::pipelines::emotion::Prediction;

/// ModernBERT encoder with a sequence-classification head.
pub struct EmotionModernBertModel {
    model: CandleModernBertForSequenceClassification,
    device: Device,
    labels: LabelSet,
}

impl EmotionModernBertModel {
    pub fn new(files: &ModelFiles, device: Device) -> Result<Self> {
        let (raw, artifact) = files.read_config()?;
        let labels = LabelSet::from_id2label(&artifact.id2label)?;

        let mut config: Config = serde_json::from_str(&raw)?;
        patch_classifier_config(&mut config, &labels);

        let vb = load_var_builder(&files.weights, &device)?;
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            device,
            labels,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        let encoding = encode(tokenizer, text)?;
        let (input_ids, attention_mask) = encoding_tensors(&encoding, &self.device)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        top1(&logits, &self.labels)
    }
}

impl TextClassificationModel for EmotionModernBertModel {
    fn load(files: &ModelFiles, device: Device) -> Result<Self> {
        EmotionModernBertModel::new(files, device)
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

/// The Hugging Face export keeps `id2label` at the top level of `config.json`,
/// while candle sizes the classification head from `classifier_config`.
fn patch_classifier_config(config: &mut Config, labels: &LabelSet) {
    let head_size = config
        .classifier_config
        .as_ref()
        .map(|c| c.id2label.len())
        .unwrap_or(0);
    if head_size == labels.len() {
        return;
    }

    let id2label: HashMap<String, String> = labels
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, label)| (i.to_string(), label.clone()))
        .collect();
    let label2id: HashMap<String, String> = id2label
        .iter()
        .map(|(k, v)| (v.clone(), k.clone()))
        .collect();

    let classifier_pooling = config
        .classifier_config
        .as_ref()
        .map(|c| c.classifier_pooling.clone())
        .unwrap_or_default();

    config.classifier_config = Some(ClassifierConfig {
        id2label,
        label2id,
        classifier_pooling,
    });
}
