// src/error.rs
//! Error types for the block compression pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Pipeline error types.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the input source or the report file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Code table could not be rendered as JSON.
    #[error("code table serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Tree construction was asked to work on a block with no tokens.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyFrequencyTable,

    /// A token reached the packer that has no code.
    #[error("token {token:?} has no entry in the code table")]
    UnknownToken { token: String },

    /// Tree or code table shape is broken.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::Invariant(message.into())
    }

    /// True for errors caused by a logic defect rather than the environment.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::EmptyFrequencyTable | Error::UnknownToken { .. } | Error::Invariant(_)
        )
    }
}
