use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_SEQ_LEN;
use crate::embedding::error::EncoderError;

#[derive(Debug, Clone)]
/// Configuration for [`SemanticEncoder`](super::SemanticEncoder).
pub struct EncoderConfig {
    /// Directory holding `config.json`, `model.safetensors`, and
    /// `tokenizer.json` for the sentence-embedding model.
    pub model_dir: PathBuf,
    /// Max tokens per text before truncation.
    pub max_seq_len: usize,
    /// If true, skip model loading and use the deterministic character
    /// encoder (no model files required).
    pub use_fallback: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            use_fallback: false,
        }
    }
}

impl EncoderConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_DIR: &'static str = "GROUNDCHECK_MODEL_DIR";
    /// Env var overriding the truncation length.
    pub const ENV_MAX_SEQ_LEN: &'static str = "GROUNDCHECK_MAX_SEQ_LEN";

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a fallback-only config (no model files; deterministic
    /// character vectors).
    pub fn fallback() -> Self {
        Self {
            use_fallback: true,
            ..Default::default()
        }
    }

    /// Loads config from environment variables.
    ///
    /// A missing or empty `GROUNDCHECK_MODEL_DIR` leaves the path empty,
    /// which [`validate`](Self::validate) rejects unless fallback mode is
    /// requested.
    pub fn from_env() -> Result<Self, EncoderError> {
        let model_dir = std::env::var(Self::ENV_MODEL_DIR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default();

        let max_seq_len = match std::env::var(Self::ENV_MAX_SEQ_LEN)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| EncoderError::InvalidConfig {
                    reason: format!("{} must be a positive integer, got {raw:?}", Self::ENV_MAX_SEQ_LEN),
                })?,
            None => DEFAULT_MAX_SEQ_LEN,
        };

        Ok(Self {
            model_dir,
            max_seq_len,
            use_fallback: false,
        })
    }

    /// Validates required fields for non-fallback mode.
    pub fn validate(&self) -> Result<(), EncoderError> {
        if self.use_fallback {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EncoderError::InvalidConfig {
                reason: "model_dir is required (fallback is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EncoderError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EncoderError::InvalidConfig {
                reason: "max_seq_len must be nonzero".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `true` if the model weight file exists.
    pub fn model_available(&self) -> bool {
        self.weights_path().is_file()
    }

    /// Returns `true` if the tokenizer file exists.
    pub fn tokenizer_available(&self) -> bool {
        self.tokenizer_path().is_file()
    }

    /// Path to the transformer config inside the model directory.
    pub fn model_config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }

    /// Path to the safetensors weights inside the model directory.
    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join("model.safetensors")
    }

    /// Path to `tokenizer.json` inside the model directory.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }
}
