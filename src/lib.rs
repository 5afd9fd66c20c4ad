//! Emotion classification microservice.
//!
//! Loads a fine-tuned sequence classifier with [Candle](https://github.com/huggingface/candle)
//! once at startup and serves `POST /analyze`, which returns the dominant
//! emotion of a text message.

// ============ Internal API ============

pub(crate) mod pipelines;

// ============ Public API ============

pub mod config;
pub mod error;
pub mod loaders;
pub mod logging;
pub mod models;
pub mod server;

pub use pipelines::emotion;
