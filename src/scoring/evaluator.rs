use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::constants::{
    CHARS_PER_TOKEN, COST_PER_1K_TOKENS_USD, LEXICAL_WEIGHT, MIN_SENTENCE_CHARS, SEMANTIC_WEIGHT,
};
use crate::embedding::TextEncoder;
use crate::similarity::max_similarity;

use super::error::ScoringError;
use super::types::{
    EvaluationInput, EvaluationMetrics, EvaluationReport, HallucinationSummary, SentenceVerdict,
};

/// Scores one chatbot turn against its retrieved context.
///
/// Holds the encoder as an injected capability so callers resolve the
/// model/fallback choice once at startup and tests can substitute a mock.
/// A single `evaluate` call is synchronous; the evaluator itself is as
/// thread-safe as its encoder (which [`TextEncoder`] requires).
pub struct TurnEvaluator {
    encoder: Arc<dyn TextEncoder>,
}

impl std::fmt::Debug for TurnEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEvaluator")
            .field("embedding_dim", &self.encoder.embedding_dim())
            .finish()
    }
}

impl TurnEvaluator {
    /// Creates an evaluator over the given encoding capability.
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    /// Scores the turn, producing relevance, completeness, hallucination,
    /// and latency/cost metrics.
    ///
    /// Each distinct text is encoded exactly once and the vectors are reused
    /// across the three scorers. Empty context or empty text degrades to
    /// `0.0` scores; the only error is a propagated encoder failure (the
    /// deterministic fallback encoder never produces one).
    pub fn evaluate(&self, input: &EvaluationInput) -> Result<EvaluationReport, ScoringError> {
        let started = Instant::now();

        debug!(
            context_chunks = input.context_texts.len(),
            user_len = input.user_message.len(),
            response_len = input.model_response.len(),
            "Starting turn evaluation"
        );

        let context_refs: Vec<&str> = input.context_texts.iter().map(String::as_str).collect();
        let context_vectors = self.encoder.encode_batch(&context_refs)?;
        let user_vector = self.encoder.encode(&input.user_message)?;
        let response_vector = self.encoder.encode(&input.model_response)?;

        let relevance_score = relevance(&user_vector, &context_vectors);
        let completeness_score = completeness(
            &response_vector,
            &input.model_response,
            &input.context_texts,
            &context_vectors,
        );
        let hallucination = self.assess_support(&input.model_response, &context_vectors)?;

        let metrics = EvaluationMetrics {
            latency_seconds: started.elapsed().as_secs_f64(),
            cost_usd: estimated_cost(&input.user_message, &input.model_response),
        };

        debug!(
            relevance = relevance_score,
            completeness = completeness_score,
            unsupported = hallucination.unsupported_count,
            total_sentences = hallucination.total_sentences,
            "Turn evaluation complete"
        );

        Ok(EvaluationReport {
            relevance_score,
            completeness_score,
            hallucination,
            metrics,
        })
    }

    /// Per-sentence support assessment of the response against the already
    /// encoded context chunks.
    fn assess_support(
        &self,
        response: &str,
        context_vectors: &[Vec<f32>],
    ) -> Result<HallucinationSummary, ScoringError> {
        let sentences = segment_sentences(response);
        if sentences.is_empty() {
            return Ok(HallucinationSummary::empty());
        }

        if context_vectors.is_empty() {
            // No grounding available at all: unsupported by definition,
            // without encoding a single sentence.
            let verdicts = sentences
                .into_iter()
                .map(|sentence| SentenceVerdict::new(sentence, 0.0))
                .collect();
            return Ok(HallucinationSummary::from_verdicts(verdicts));
        }

        let sentence_vectors = self.encoder.encode_batch(&sentences)?;

        let verdicts = sentences
            .iter()
            .zip(&sentence_vectors)
            .map(|(&sentence, vector)| {
                SentenceVerdict::new(sentence, max_similarity(vector, context_vectors))
            })
            .collect();

        Ok(HallucinationSummary::from_verdicts(verdicts))
    }
}

/// Best query-to-context similarity; `0.0` without context. A negative best
/// match carries no retrieval signal, so the score floors at zero.
fn relevance(user_vector: &[f32], context_vectors: &[Vec<f32>]) -> f32 {
    max_similarity(user_vector, context_vectors).clamp(0.0, 1.0)
}

/// Blend of semantic coverage and lexical overlap; `0.0` without context or
/// without response tokens.
fn completeness(
    response_vector: &[f32],
    response_text: &str,
    context_texts: &[String],
    context_vectors: &[Vec<f32>],
) -> f32 {
    if context_vectors.is_empty() {
        return 0.0;
    }

    let response_tokens = unique_tokens(response_text);
    if response_tokens.is_empty() {
        return 0.0;
    }

    let context_tokens = unique_tokens(&context_texts.join(" "));
    let overlap =
        response_tokens.intersection(&context_tokens).count() as f32 / response_tokens.len() as f32;

    let semantic = max_similarity(response_vector, context_vectors).max(0.0);

    (SEMANTIC_WEIGHT * semantic + LEXICAL_WEIGHT * overlap).clamp(0.0, 1.0)
}

/// Rough sentence segmentation: split on the literal `.`, trim, keep pieces
/// longer than [`MIN_SENTENCE_CHARS`] characters. Not true boundary
/// detection; abbreviations, decimals, and URLs missegment, and downstream
/// thresholds are calibrated to this exact behavior.
pub(crate) fn segment_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|piece| piece.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Unique lowercase whitespace-delimited tokens.
pub(crate) fn unique_tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Heuristic inference cost over both free-text inputs, identical for every
/// encoder backend: `chars / 4 / 1000 * 0.0001`.
pub(crate) fn estimated_cost(user_message: &str, model_response: &str) -> f64 {
    let total_chars = (user_message.chars().count() + model_response.chars().count()) as f64;
    total_chars / CHARS_PER_TOKEN / 1000.0 * COST_PER_1K_TOKENS_USD
}
