//! Error types shared by the field, polynomial, encoder and decoder modules.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding or correcting PDF417 codeword blocks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller supplied arguments that can never be valid
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The symbol would hold more codewords than PDF417 allows
    #[error("input of {length} codewords exceeds the maximum of {max_length}")]
    InputTooLarge { length: usize, max_length: usize },

    /// Inverse of zero or division by the zero polynomial
    #[error("division by zero in GF(929)")]
    DivisionByZero,

    /// The block holds more errors or erasures than the code can repair
    #[error("uncorrectable block: {0}")]
    UncorrectableBlock(String),
}

impl Error {
    pub(crate) fn uncorrectable(reason: impl Into<String>) -> Self {
        Error::UncorrectableBlock(reason.into())
    }
}
