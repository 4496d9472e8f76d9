//! Text-to-vector encoding.
//!
//! [`SemanticEncoder`] is the production encoder: a sentence-embedding model
//! when one can be loaded, a deterministic character encoder otherwise. The
//! scoring engine consumes the [`TextEncoder`] capability trait, so tests can
//! substitute [`MockEncoder`] without process-wide side effects.

/// Encoder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
pub(crate) mod model;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use config::EncoderConfig;
pub use error::EncoderError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;

use candle_core::Device;
use tracing::{debug, info, warn};

use crate::constants::FALLBACK_EMBEDDING_DIM;
use crate::embedding::device::select_device;
use crate::embedding::model::SentenceBert;

/// Capability consumed by the scoring engine: map text to fixed-dimensional
/// vectors.
///
/// Implementations must be safe for concurrent invocation; batch results
/// preserve input order.
pub trait TextEncoder: Send + Sync {
    /// Encodes a single string.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;

    /// Encodes a batch of strings, output order matching input order.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// The fixed output dimension of this encoder.
    fn embedding_dim(&self) -> usize;
}

enum EncoderBackend {
    Model { model: SentenceBert, device: Device },
    Fallback,
}

/// Production text encoder with a model-backed and a fallback backend.
///
/// The backend is chosen once at construction and applies to every call for
/// the lifetime of the value; there is no per-call switching. Both backends
/// are safe for concurrent `encode` calls: the loaded model is read-only and
/// its forward pass holds no mutable state, and the fallback is pure.
pub struct SemanticEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for SemanticEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Fallback => "Fallback".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .finish()
    }
}

impl SemanticEncoder {
    /// Loads the encoder from a config.
    ///
    /// Errors if the config requests the model backend and the model cannot
    /// be loaded. Use [`with_fallback`](Self::with_fallback) for the
    /// degrade-instead-of-fail policy.
    pub fn load(config: EncoderConfig) -> Result<Self, EncoderError> {
        config.validate()?;

        if config.use_fallback {
            debug!("Semantic encoder running with the deterministic fallback backend");
            return Ok(Self {
                backend: EncoderBackend::Fallback,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        let model = SentenceBert::load(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Sentence-embedding model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model { model, device },
            config,
        })
    }

    /// Loads the model backend if possible, otherwise falls back.
    ///
    /// This is the startup-time resolution of encoder availability: the
    /// outcome applies to every evaluation for the process lifetime, and
    /// construction never fails.
    pub fn with_fallback(config: EncoderConfig) -> Self {
        match Self::load(config) {
            Ok(encoder) => encoder,
            Err(e) => {
                warn!(error = %e, "Embedding model unavailable, using fallback encoder");
                Self::fallback()
            }
        }
    }

    /// Creates an encoder using only the deterministic fallback backend.
    pub fn fallback() -> Self {
        Self {
            backend: EncoderBackend::Fallback,
            config: EncoderConfig::fallback(),
        }
    }

    /// Returns `true` if running on the fallback backend.
    pub fn is_fallback(&self) -> bool {
        matches!(self.backend, EncoderBackend::Fallback)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Character-position vector: entry `i` holds `code_point / 255.0` for
    /// the i-th of the first 256 characters. No semantic meaning; it keeps
    /// the pipeline running end-to-end without model files.
    fn encode_fallback(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; FALLBACK_EMBEDDING_DIM];
        for (i, ch) in text.chars().take(FALLBACK_EMBEDDING_DIM).enumerate() {
            vector[i] = ch as u32 as f32 / 255.0;
        }
        vector
    }
}

impl TextEncoder for SemanticEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.embed(text),
            EncoderBackend::Fallback => Ok(Self::encode_fallback(text)),
        }
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(batch_size = texts.len(), "Encoding text batch");

        texts.iter().map(|text| self.encode(text)).collect()
    }

    fn embedding_dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Fallback => FALLBACK_EMBEDDING_DIM,
        }
    }
}
