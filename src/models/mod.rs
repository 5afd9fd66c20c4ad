// ============ Model implementations ============

pub(crate) mod modernbert;
pub(crate) mod roberta;

pub use modernbert::EmotionModernBertModel;
pub use roberta::EmotionRobertaModel;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use std::collections::HashMap;
use std::path::Path;
use tokenizers::{Encoding, Tokenizer};

use crate::error::{PipelineError, Result};
use crate::pipelines::emotion::Prediction;

/// Sequence-classification architectures the service can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    ModernBert,
    Roberta,
}

impl Architecture {
    /// Map a `model_type` from `config.json`.
    pub fn from_model_type(model_type: &str) -> Result<Self> {
        match model_type {
            "modernbert" => Ok(Architecture::ModernBert),
            "roberta" | "xlm-roberta" => Ok(Architecture::Roberta),
            "" => Err(PipelineError::ModelFormat(
                "config.json has no 'model_type'".into(),
            )),
            other => Err(PipelineError::ModelFormat(format!(
                "unsupported model_type '{other}' (expected modernbert, roberta or xlm-roberta)"
            ))),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Architecture::ModernBert => "modernbert",
            Architecture::Roberta => "roberta",
        };
        write!(f, "{name}")
    }
}

/// The closed label vocabulary of a classifier, indexed by class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Build from an `id2label` map. Ids must cover `0..n` with no gaps.
    pub fn from_id2label(id2label: &HashMap<String, String>) -> Result<Self> {
        if id2label.is_empty() {
            return Err(PipelineError::ModelFormat(
                "config.json has no 'id2label' mapping".into(),
            ));
        }

        let mut labels = vec![None; id2label.len()];
        for (id, label) in id2label {
            let idx = id
                .parse::<usize>()
                .ok()
                .filter(|&i| i < labels.len())
                .ok_or_else(|| {
                    PipelineError::ModelFormat(format!(
                        "id2label key '{id}' is not a class index below {}",
                        id2label.len()
                    ))
                })?;
            labels[idx] = Some(label.clone());
        }

        // Duplicate keys like "1" and "01" leave a hole.
        labels
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(Self)
            .ok_or_else(|| PipelineError::ModelFormat("id2label ids are not contiguous".into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

pub(crate) fn load_var_builder(
    weights_path: &Path,
    device: &Device,
) -> Result<VarBuilder<'static>> {
    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(weights_path, DType::F32, device)?
    };
    Ok(vb)
}

pub(crate) fn encode(tokenizer: &Tokenizer, text: &str) -> Result<Encoding> {
    tokenizer.encode(text, true).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Tokenization failed on '{}': {}",
            &text.chars().take(50).collect::<String>(),
            e
        ))
    })
}

/// Rank-2 `(1, seq_len)` tensors for a single encoding.
pub(crate) fn encoding_tensors(
    encoding: &Encoding,
    device: &Device,
) -> Result<(Tensor, Tensor)> {
    let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
    let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;
    Ok((input_ids, attention_mask))
}

/// Pick the argmax class of `(1, num_labels)` logits and its softmax probability.
pub(crate) fn top1(logits: &Tensor, labels: &LabelSet) -> Result<Prediction> {
    let pred_id = logits.argmax(D::Minus1)?.squeeze(0)?.to_scalar::<u32>()? as usize;

    let probs = softmax(logits, D::Minus1)?;
    let probs_vec = probs.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()?;
    let score = probs_vec.get(pred_id).copied().unwrap_or(0.0);

    let label = labels.get(pred_id).ok_or_else(|| {
        PipelineError::Unexpected(format!(
            "Predicted label ID {} not in id2label. Available: {}",
            pred_id,
            labels.as_slice().join(", ")
        ))
    })?;

    Ok(Prediction {
        label: label.to_string(),
        score,
    })
}
