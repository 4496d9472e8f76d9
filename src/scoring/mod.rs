//! Turn-level quality scoring.
//!
//! [`TurnEvaluator`] encodes the user message, response, and context chunks
//! once each, then computes three metrics over the shared vectors:
//!
//! - relevance: best query-to-context similarity (a single strong retrieval
//!   match suffices, hence max rather than mean)
//! - completeness: semantic coverage blended 60/40 with lexical overlap
//! - hallucination: per-sentence support against a fixed 0.55 threshold
//!
//! Degenerate inputs degrade to `0.0` scores instead of erroring; the only
//! error path is a propagated encoder inference failure.

pub mod error;
pub mod evaluator;
pub mod types;


pub use error::ScoringError;
pub use evaluator::TurnEvaluator;
pub use types::{
    EvaluationInput, EvaluationMetrics, EvaluationReport, HallucinationSummary, SentenceVerdict,
};
