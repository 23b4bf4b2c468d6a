//! Reed-Solomon error correction for PDF417 codewords.
//!
//! PDF417 protects its codewords with a Reed-Solomon code over the prime field
//! GF(929) rather than the binary fields used by most other symbologies. This
//! module provides:
//! - Field arithmetic in GF(929) with shared log/antilog tables
//! - Immutable polynomials over the field
//! - ECC codeword generation for a given number of ECC codewords
//! - Erasure and error correction (Euclidean key-equation solver, exhaustive
//!   root search, Forney magnitudes)
//! - A level-aware codec enforcing the symbology's `l + 2f <= 2^(s+1) - 2` bound
//!
//! # Examples
//!
//! ```rust
//! use pdf417_ec::ecc::{decode, encode};
//!
//! let mut block = encode(&[5, 453, 178, 121, 239], 4).unwrap();
//! block[1] = 0;
//! decode(&mut block, 4, &[]).unwrap();
//! assert_eq!(&block[..5], &[5, 453, 178, 121, 239]);
//! ```

use crate::error::Result;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Append error correction codewords to `data`
    fn encode(&self, data: &[u16]) -> Result<Vec<u16>>;

    /// Correct `received` in place, treating `erasures` as known-bad positions.
    /// Returns the number of codewords changed.
    fn decode(&self, received: &mut [u16], erasures: &[usize]) -> Result<usize>;
}

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod field;
pub mod level;
pub mod polynomial;

#[cfg(test)]
mod tests;

pub use codec::Pdf417Codec;
pub use decoder::{decode, is_consistent};
pub use encoder::{encode, generate_ecc, generator_polynomial, MAX_CODEWORDS};
pub use field::{ModulusField, GENERATOR, MODULUS};
pub use level::{ErrorCorrectionLevel, MAX_LEVEL};
pub use polynomial::ModulusPoly;
