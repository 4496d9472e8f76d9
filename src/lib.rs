//! Groundcheck library crate.
//!
//! Scores a single chatbot turn (user message + assistant response) against
//! retrieved context chunks, producing three semantic quality metrics:
//!
//! - **Relevance** — did retrieval surface anything topically close to the
//!   user's query? (best-match similarity between query and context)
//! - **Completeness** — how well is the response covered by the context?
//!   (semantic coverage blended with lexical overlap)
//! - **Hallucination** — which response sentences lack support in the
//!   context? (per-sentence best-match similarity against a fixed threshold)
//!
//! # Public API Surface
//!
//! ## Encoding
//! - [`SemanticEncoder`], [`EncoderConfig`] - Text-to-vector encoding with a
//!   model-backed backend and a deterministic fallback
//! - [`TextEncoder`] - The capability trait the scoring engine consumes
//!
//! ## Scoring
//! - [`TurnEvaluator`] - The scoring engine
//! - [`EvaluationInput`], [`EvaluationReport`] - Call contract
//! - [`HallucinationSummary`], [`SentenceVerdict`], [`EvaluationMetrics`]
//!
//! ## Similarity
//! - [`cosine_similarity`], [`similarity_batch`], [`max_similarity`]
//!
//! ## Test/Mock Support
//! - [`MockEncoder`] behind `#[cfg(any(test, feature = "mock"))]`
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use groundcheck::{EvaluationInput, SemanticEncoder, TurnEvaluator};
//!
//! let encoder = Arc::new(SemanticEncoder::fallback());
//! let evaluator = TurnEvaluator::new(encoder);
//!
//! let input = EvaluationInput::new(
//!     vec!["The museum opens at 9am daily.".to_string()],
//!     "When does the museum open?".to_string(),
//!     "The museum opens at 9am daily.".to_string(),
//! );
//!
//! let report = evaluator.evaluate(&input).unwrap();
//! assert!(report.relevance_score >= 0.0 && report.relevance_score <= 1.0);
//! ```

pub mod constants;
pub mod embedding;
pub mod scoring;
pub mod similarity;

pub use constants::{
    FALLBACK_EMBEDDING_DIM, LEXICAL_WEIGHT, MIN_SENTENCE_CHARS, SEMANTIC_WEIGHT, SUPPORT_THRESHOLD,
};
pub use embedding::{EncoderConfig, EncoderError, SemanticEncoder, TextEncoder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use scoring::{
    EvaluationInput, EvaluationMetrics, EvaluationReport, HallucinationSummary, ScoringError,
    SentenceVerdict, TurnEvaluator,
};
pub use similarity::{cosine_similarity, max_similarity, similarity_batch};
