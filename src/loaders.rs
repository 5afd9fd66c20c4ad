use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const SAFETENSORS_FILE: &str = "model.safetensors";
pub const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Where the model artifact comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A directory holding a Hugging Face style export.
    Local(PathBuf),
    /// A Hugging Face Hub repository, fetched into the local cache.
    Hub { repo: String },
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Local(dir) => write!(f, "{}", dir.display()),
            ModelSource::Hub { repo } => write!(f, "hf://{repo}"),
        }
    }
}

impl ModelSource {
    /// Locate the files of the artifact, downloading them first for Hub sources.
    pub fn resolve(&self) -> Result<ModelFiles> {
        match self {
            ModelSource::Local(dir) => ModelFiles::from_dir(dir),
            ModelSource::Hub { repo } => HfLoader::new(repo).load(),
        }
    }
}

/// Resolved paths of the three parts of an artifact.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(PipelineError::ModelNotFound(format!(
                "model directory '{}' does not exist",
                dir.display()
            )));
        }

        let config = required_file(dir, CONFIG_FILE)?;
        let tokenizer = required_file(dir, TOKENIZER_FILE)?;

        let weights = [SAFETENSORS_FILE, PYTORCH_FILE]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                PipelineError::ModelNotFound(format!(
                    "no weights in '{}' (expected {SAFETENSORS_FILE} or {PYTORCH_FILE})",
                    dir.display()
                ))
            })?;

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }

    /// Read `config.json` once, returning the raw text alongside the fields
    /// shared by every supported architecture.
    pub fn read_config(&self) -> Result<(String, ArtifactConfig)> {
        let raw = std::fs::read_to_string(&self.config)?;
        let parsed: ArtifactConfig = serde_json::from_str(&raw).map_err(|e| {
            PipelineError::ModelFormat(format!(
                "failed to parse '{}': {e}",
                self.config.display()
            ))
        })?;
        Ok((raw, parsed))
    }
}

fn required_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::ModelNotFound(format!(
            "'{name}' missing from '{}'",
            dir.display()
        )))
    }
}

/// Architecture-independent part of `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
}

impl HfLoader {
    pub fn new(repo: &str) -> Self {
        Self { repo: repo.into() }
    }

    pub fn load(&self) -> Result<ModelFiles> {
        let api = Api::new().map_err(|e| {
            PipelineError::Download(format!("Failed to initialize HuggingFace API: {e}"))
        })?;
        let repo = api.repo(Repo::new(self.repo.clone(), RepoType::Model));

        let config = self.fetch(&repo, CONFIG_FILE)?;
        let tokenizer = self.fetch(&repo, TOKENIZER_FILE)?;
        let weights = self
            .fetch(&repo, SAFETENSORS_FILE)
            .or_else(|_| self.fetch(&repo, PYTORCH_FILE))?;

        Ok(ModelFiles {
            config,
            tokenizer,
            weights,
        })
    }

    fn fetch(&self, repo: &ApiRepo, filename: &str) -> Result<PathBuf> {
        repo.get(filename).map_err(|e| {
            PipelineError::Download(format!(
                "Failed to download '{}' from '{}': {}",
                filename, self.repo, e
            ))
        })
    }
}

pub fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Failed to load tokenizer from '{}': {}",
            path.display(),
            e
        ))
    })
}
