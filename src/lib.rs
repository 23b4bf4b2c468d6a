//! Error correction for PDF417 barcodes.
//!
//! The [`ecc`] module decodes blocks of PDF417 codewords protected by the
//! symbology's Reed-Solomon code over GF(929), repairing substitution errors and
//! declared erasures in place.

pub mod ecc;
pub mod error;

pub use ecc::{decode, encode, ErrorCorrection, ErrorCorrectionLevel, Pdf417Codec};
pub use error::{Error, Result};
