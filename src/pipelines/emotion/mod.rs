//! Emotion classification pipeline.
//!
//! Classify text into the dominant emotion of a fine-tuned sequence
//! classifier (e.g. `joy`, `sadness`, `anger`, `fear`, `neutral`). The label
//! set is whatever the model's `id2label` mapping declares.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emotion_service::emotion::EmotionPipelineBuilder;
//!
//! # fn main() -> emotion_service::error::Result<()> {
//! let classifier = EmotionPipelineBuilder::from_dir("final_roberta_emotion_model").build()?;
//!
//! let output = classifier.classify("I finally got the job!")?;
//! println!("emotion: {} (confidence: {:.2})", output.prediction.label, output.prediction.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Supported Models
//!
//! The architecture is read from `model_type` in `config.json`.
//!
//! | `model_type` | Model |
//! |-------|-------|
//! | `roberta`, `xlm-roberta` | [`EmotionRoberta`] |
//! | `modernbert` | [`EmotionModernBert`] |

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::pipelines::stats::PipelineStats;
pub use crate::pipelines::utils::DeviceRequest;
pub use builder::EmotionPipelineBuilder;
pub use model::TextClassificationModel;
pub use pipeline::{Classifier, EmotionPipeline, Output, Prediction};

/// Only for generic annotations. Use [`EmotionPipelineBuilder::build_with`].
pub type EmotionRoberta = crate::models::EmotionRobertaModel;

/// Only for generic annotations. Use [`EmotionPipelineBuilder::build_with`].
pub type EmotionModernBert = crate::models::EmotionModernBertModel;
