//! PDF417 error correction levels.
//!
//! A symbol at level `s` carries `2^(s+1)` ECC codewords. The symbology allows
//! `l` erasures and `f` substitution errors to be repaired only while
//! `l + 2f <= 2^(s+1) - 2`. The two codewords held back from correction let the
//! decoder detect most patterns that would otherwise be miscorrected.

use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};

/// Highest error correction level defined for PDF417
pub const MAX_LEVEL: u8 = 8;

/// A validated PDF417 error correction level (0 to 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ErrorCorrectionLevel(u8);

impl ErrorCorrectionLevel {
    /// Create a level, rejecting values above [`MAX_LEVEL`]
    pub fn new(level: u8) -> Result<Self> {
        if level > MAX_LEVEL {
            return Err(Error::InvalidInput(format!(
                "Error correction level must be between 0 and {}, got {}",
                MAX_LEVEL, level
            )));
        }
        Ok(ErrorCorrectionLevel(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Number of ECC codewords appended at this level
    pub fn ecc_count(&self) -> usize {
        1 << (self.0 + 1)
    }

    /// Largest `l + 2f` this level may repair
    pub fn correction_capacity(&self) -> usize {
        self.ecc_count() - 2
    }

    /// Most erasures repairable when there are no other errors
    pub fn max_erasures(&self) -> usize {
        self.correction_capacity()
    }

    /// Most substitution errors repairable when nothing is erased
    pub fn max_errors(&self) -> usize {
        self.correction_capacity() / 2
    }

    /// Whether `erasures` erasures plus `errors` substitutions are within capacity
    pub fn can_correct(&self, erasures: usize, errors: usize) -> bool {
        erasures + 2 * errors <= self.correction_capacity()
    }
}

impl TryFrom<u8> for ErrorCorrectionLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        ErrorCorrectionLevel::new(level)
    }
}

impl Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "level {}", self.0)
    }
}
