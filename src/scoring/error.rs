use thiserror::Error;

use crate::embedding::EncoderError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("encoder error: {0}")]
    Encoder(#[from] EncoderError),
}
