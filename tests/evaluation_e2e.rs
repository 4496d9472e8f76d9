//! End-to-end evaluation through the public API.

use std::sync::Arc;

use groundcheck::{EvaluationInput, MockEncoder, SemanticEncoder, TurnEvaluator};

const CONTEXT: &str = "Gopal Mansion room is Rs 800 per night.";
const QUESTION: &str = "How much are rooms per night?";
const RESPONSE: &str =
    "Gopal Mansion room is Rs 800 per night. Our clinic has free spa treatments.";

fn turn_input() -> EvaluationInput {
    EvaluationInput::new(
        vec![CONTEXT.to_string()],
        QUESTION.to_string(),
        RESPONSE.to_string(),
    )
}

#[test]
fn fallback_pipeline_runs_end_to_end() {
    let evaluator = TurnEvaluator::new(Arc::new(SemanticEncoder::fallback()));

    let report = evaluator.evaluate(&turn_input()).expect("evaluate");

    // The fallback encoder carries no semantics; assert structure, not
    // meaning.
    assert!((0.0..=1.0).contains(&report.relevance_score));
    assert!((0.0..=1.0).contains(&report.completeness_score));
    assert_eq!(report.hallucination.total_sentences, 2);
    assert_eq!(report.hallucination.sentences.len(), 2);
    assert_eq!(
        report.hallucination.sentences[0].sentence,
        "Gopal Mansion room is Rs 800 per night"
    );
    assert_eq!(
        report.hallucination.sentences[1].sentence,
        "Our clinic has free spa treatments"
    );
    assert!(report.metrics.latency_seconds >= 0.0);
    assert!(report.metrics.cost_usd > 0.0);
}

#[test]
fn fallback_pipeline_is_deterministic() {
    let evaluator = TurnEvaluator::new(Arc::new(SemanticEncoder::fallback()));

    let first = evaluator.evaluate(&turn_input()).expect("evaluate");
    let second = evaluator.evaluate(&turn_input()).expect("evaluate");

    assert_eq!(first.relevance_score, second.relevance_score);
    assert_eq!(first.completeness_score, second.completeness_score);
    assert_eq!(first.hallucination, second.hallucination);
    assert_eq!(first.metrics.cost_usd, second.metrics.cost_usd);
}

#[test]
fn mixed_grounding_flags_only_the_fabricated_sentence() {
    // Controlled geometry: the context and the grounded sentence share a
    // direction, the fabricated sentence is orthogonal.
    let encoder = MockEncoder::new(3)
        .with_vector(CONTEXT, vec![1.0, 0.0, 0.0])
        .with_vector(QUESTION, vec![0.9, 0.1, 0.0])
        .with_vector(RESPONSE, vec![0.8, 0.2, 0.0])
        .with_vector("Gopal Mansion room is Rs 800 per night", vec![1.0, 0.0, 0.0])
        .with_vector("Our clinic has free spa treatments", vec![0.0, 0.0, 1.0]);
    let evaluator = TurnEvaluator::new(Arc::new(encoder));

    let report = evaluator.evaluate(&turn_input()).expect("evaluate");

    assert!(report.relevance_score > 0.7);

    let summary = &report.hallucination;
    assert_eq!(summary.total_sentences, 2);
    assert_eq!(summary.unsupported_count, 1);
    assert!((summary.unsupported_ratio - 0.5).abs() < 1e-6);
    assert!(summary.sentences[0].is_supported);
    assert!(!summary.sentences[1].is_supported);
}

#[test]
fn missing_context_degrades_instead_of_failing() {
    let evaluator = TurnEvaluator::new(Arc::new(SemanticEncoder::fallback()));

    let report = evaluator
        .evaluate(&EvaluationInput::new(
            vec![],
            QUESTION.to_string(),
            RESPONSE.to_string(),
        ))
        .expect("evaluate");

    assert_eq!(report.relevance_score, 0.0);
    assert_eq!(report.completeness_score, 0.0);
    assert_eq!(report.hallucination.unsupported_ratio, 1.0);
    assert_eq!(
        report.hallucination.unsupported_count,
        report.hallucination.total_sentences
    );
}

#[test]
fn encoder_swap_changes_only_scores_not_shape() {
    let fallback = TurnEvaluator::new(Arc::new(SemanticEncoder::fallback()));
    let mock = TurnEvaluator::new(Arc::new(MockEncoder::new(4)));

    let input = turn_input();
    let a = fallback.evaluate(&input).expect("evaluate");
    let b = mock.evaluate(&input).expect("evaluate");

    assert_eq!(a.hallucination.total_sentences, b.hallucination.total_sentences);
    assert_eq!(a.metrics.cost_usd, b.metrics.cost_usd);
}

/// Semantic variant of the mixed-grounding scenario, using a real
/// sentence-embedding model.
///
/// Run with: GROUNDCHECK_MODEL_DIR=/models/all-minilm-l6-v2 \
///   cargo test --test evaluation_e2e -- --ignored
#[test]
#[ignore]
fn semantic_model_flags_the_fabricated_sentence() {
    let config = groundcheck::EncoderConfig::from_env().expect("read env config");
    let encoder = SemanticEncoder::load(config).expect("load model");
    assert!(encoder.has_model());

    let evaluator = TurnEvaluator::new(Arc::new(encoder));
    let report = evaluator.evaluate(&turn_input()).expect("evaluate");

    assert!(report.relevance_score > 0.5);

    let summary = &report.hallucination;
    assert_eq!(summary.total_sentences, 2);
    assert_eq!(summary.unsupported_count, 1);
    assert!((summary.unsupported_ratio - 0.5).abs() < 1e-6);
    assert!(summary.sentences[0].is_supported);
    assert!(!summary.sentences[1].is_supported);
}
