//! BERT-family sentence embedder (safetensors + tokenizer).

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::{Tokenizer, TruncationDirection, TruncationParams, TruncationStrategy};
use tracing::debug;

use super::config::EncoderConfig;
use super::error::EncoderError;

/// A loaded sentence-embedding model.
///
/// The forward pass is stateless (`&self`, read-only weights), so a loaded
/// model is safe to share across threads and call concurrently.
pub(crate) struct SentenceBert {
    bert: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    hidden_size: usize,
}

impl SentenceBert {
    pub(crate) fn load(config: &EncoderConfig, device: &Device) -> Result<Self, EncoderError> {
        let config_path = config.model_config_path();
        if !config_path.is_file() {
            return Err(EncoderError::ModelLoadFailed {
                reason: format!("missing config.json in {}", config.model_dir.display()),
            });
        }
        if !config.model_available() {
            return Err(EncoderError::ModelNotFound {
                path: config.weights_path(),
            });
        }
        if !config.tokenizer_available() {
            return Err(EncoderError::ModelLoadFailed {
                reason: format!("missing tokenizer.json in {}", config.model_dir.display()),
            });
        }

        let config_content = std::fs::read_to_string(&config_path)?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| EncoderError::ModelLoadFailed {
                reason: format!("failed to parse config.json: {}", e),
            })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)
                .map_err(|e| EncoderError::ModelLoadFailed {
                    reason: format!("failed to map safetensors: {}", e),
                })?
        };

        // Sentence-transformer exports prefix tensors differently depending
        // on the upstream architecture.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("roberta"), &bert_config)
        } else {
            BertModel::load(vb.clone(), &bert_config)
        }
        .map_err(|e| EncoderError::ModelLoadFailed {
            reason: format!("failed to load BERT weights: {}", e),
        })?;

        let mut tokenizer = Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EncoderError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {}", e),
            }
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_seq_len,
                strategy: TruncationStrategy::LongestFirst,
                stride: 0,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| EncoderError::TokenizationFailed {
                reason: format!("failed to configure truncation: {}", e),
            })?;

        Ok(Self {
            bert,
            tokenizer,
            device: device.clone(),
            hidden_size: bert_config.hidden_size,
        })
    }

    pub(crate) fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Embeds one text: masked mean pooling over the final hidden states,
    /// then L2 normalization.
    pub(crate) fn embed(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| EncoderError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let token_ids = encoding.get_ids();
        if token_ids.is_empty() {
            return Ok(vec![0.0; self.hidden_size]);
        }

        debug!(
            text_len = text.len(),
            token_count = token_ids.len(),
            "Embedding text (transformer forward pass)"
        );

        let input_ids = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .bert
            .forward(&input_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| EncoderError::InferenceFailed {
                reason: format!("transformer forward pass failed: {}", e),
            })?;

        // Mean-pool [1, seq, hidden] over the sequence axis, ignoring
        // padding positions.
        let mask = attention_mask
            .to_dtype(DType::F32)?
            .unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        let embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;

        Ok(l2_normalize(embedding))
    }
}

pub(crate) fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
