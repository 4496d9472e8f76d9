//! Mock encoder for engine-level tests.

use std::collections::HashMap;

use super::error::EncoderError;
use super::TextEncoder;

/// Returns pre-registered vectors per exact text; unregistered text encodes
/// to the all-zero vector (which scores `0.0` against everything).
///
/// Lets tests pin engine decisions (threshold comparisons, weight blending)
/// with controlled vector geometry instead of real embeddings.
#[derive(Debug, Clone, Default)]
pub struct MockEncoder {
    vectors: HashMap<String, Vec<f32>>,
    embedding_dim: usize,
}

impl MockEncoder {
    /// Creates a mock producing vectors of `embedding_dim` entries.
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            embedding_dim,
        }
    }

    /// Registers the vector returned for `text`.
    ///
    /// # Panics
    ///
    /// Panics if `vector.len()` differs from the mock's dimension (test
    /// misconfiguration).
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        assert_eq!(
            vector.len(),
            self.embedding_dim,
            "mock vector dimension mismatch"
        );
        self.vectors.insert(text.into(), vector);
        self
    }
}

impl TextEncoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.embedding_dim]))
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}
