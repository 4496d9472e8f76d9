use serde::{Deserialize, Serialize};

use crate::constants::SUPPORT_THRESHOLD;

/// Immutable inputs for one turn evaluation.
///
/// The core places no constraints on how the texts were obtained; a
/// collaborator typically extracts the last user and assistant turns from a
/// transcript and the text of each retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Retrieved reference passages. Order is irrelevant to scoring; may be
    /// empty.
    pub context_texts: Vec<String>,
    /// The user's message. May be empty.
    pub user_message: String,
    /// The assistant's response under assessment. May be empty.
    pub model_response: String,
}

impl EvaluationInput {
    /// Bundles the three evaluation texts.
    pub fn new(context_texts: Vec<String>, user_message: String, model_response: String) -> Self {
        Self {
            context_texts,
            user_message,
            model_response,
        }
    }
}

/// Support assessment for one response sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceVerdict {
    /// The trimmed sentence text.
    pub sentence: String,
    /// Best similarity against any context chunk, in [-1, 1] (practically
    /// [0, 1]).
    pub score: f32,
    /// Whether `score` strictly exceeds the support threshold.
    pub is_supported: bool,
}

impl SentenceVerdict {
    /// Builds a verdict, deriving support from the fixed threshold.
    ///
    /// A score exactly equal to the threshold is unsupported.
    pub fn new(sentence: impl Into<String>, score: f32) -> Self {
        Self {
            sentence: sentence.into(),
            score,
            is_supported: score > SUPPORT_THRESHOLD,
        }
    }
}

/// Aggregated hallucination assessment over the response's sentences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HallucinationSummary {
    /// Sentences whose best context similarity did not exceed the threshold.
    pub unsupported_count: usize,
    /// Sentences that survived segmentation.
    pub total_sentences: usize,
    /// `unsupported_count / total_sentences`, or `0.0` with no sentences.
    pub unsupported_ratio: f32,
    /// Per-sentence verdicts in response order; present whenever
    /// `total_sentences > 0`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<SentenceVerdict>,
}

impl HallucinationSummary {
    /// Summary for a response with no qualifying sentences.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Aggregates counts and ratio from ordered verdicts.
    pub(crate) fn from_verdicts(sentences: Vec<SentenceVerdict>) -> Self {
        let total_sentences = sentences.len();
        if total_sentences == 0 {
            return Self::empty();
        }

        let unsupported_count = sentences.iter().filter(|v| !v.is_supported).count();

        Self {
            unsupported_count,
            total_sentences,
            unsupported_ratio: unsupported_count as f32 / total_sentences as f32,
            sentences,
        }
    }

    /// Returns `true` if any sentence lacked support.
    pub fn has_unsupported(&self) -> bool {
        self.unsupported_count > 0
    }
}

/// Latency and cost accounting for one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Wall-clock duration of the whole evaluation, measured by the engine.
    pub latency_seconds: f64,
    /// Heuristic inference cost: 4 characters per token, $0.0001 per 1000
    /// tokens, over the user message and the response. Illustrative
    /// accounting, not billing-accurate.
    pub cost_usd: f64,
}

/// Structured output of one turn evaluation.
///
/// Created fresh per call and immutable once returned; persistence and
/// human-readable rendering belong to external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Best query-to-context similarity, in [0, 1].
    pub relevance_score: f32,
    /// Blended semantic/lexical context coverage of the response, in [0, 1].
    pub completeness_score: f32,
    /// Per-sentence support assessment.
    pub hallucination: HallucinationSummary,
    /// Latency and cost accounting.
    pub metrics: EvaluationMetrics,
}
