//! Cross-cutting, shared constants.
//!
//! The scoring constants here are fixed design values, not learned or tuned
//! at runtime; tests pin them exactly.

/// Dimension of vectors produced by the fallback character encoder.
pub const FALLBACK_EMBEDDING_DIM: usize = 256;

/// A sentence counts as supported when its best context similarity is
/// strictly greater than this. Exactly equal is unsupported.
pub const SUPPORT_THRESHOLD: f32 = 0.55;

/// Weight of semantic coverage in the completeness blend.
pub const SEMANTIC_WEIGHT: f32 = 0.6;

/// Weight of lexical overlap in the completeness blend.
pub const LEXICAL_WEIGHT: f32 = 0.4;

/// Response fragments at or below this many characters are discarded during
/// sentence segmentation (filters abbreviations and empty pieces).
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Cost heuristic: roughly 4 characters per token.
pub const CHARS_PER_TOKEN: f64 = 4.0;

/// Cost heuristic: price per 1000 tokens in USD.
pub const COST_PER_1K_TOKENS_USD: f64 = 0.0001;

/// Default token truncation length for the model-backed encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;
