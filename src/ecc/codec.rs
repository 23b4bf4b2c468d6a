//! Level-aware PDF417 codec.
//!
//! [`decode`](crate::ecc::decoder::decode) repairs anything inside the generic
//! Reed-Solomon bound `2f + l <= k`. PDF417 only trusts corrections inside
//! `l + 2f <= k - 2`, so this codec re-checks every successful correction against
//! its [`ErrorCorrectionLevel`] and rejects those that used the reserved margin.

use crate::ecc::decoder;
use crate::ecc::encoder;
use crate::ecc::level::ErrorCorrectionLevel;
use crate::ecc::ErrorCorrection;
use crate::error::{Error, Result};
use log::debug;
use std::collections::BTreeSet;

/// Encoder and decoder for PDF417 blocks at a fixed error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pdf417Codec {
    level: ErrorCorrectionLevel,
}

impl Pdf417Codec {
    pub fn new(level: ErrorCorrectionLevel) -> Self {
        Pdf417Codec { level }
    }

    /// Create a codec from a raw level number
    ///
    /// # Errors
    /// Returns an error if `level` is above 8
    pub fn with_level(level: u8) -> Result<Self> {
        Ok(Pdf417Codec::new(ErrorCorrectionLevel::new(level)?))
    }

    pub fn level(&self) -> ErrorCorrectionLevel {
        self.level
    }

    /// Decode many blocks that carry no erasure information
    ///
    /// Each block is corrected independently; with the `parallel` feature the
    /// blocks are spread over the rayon thread pool.
    pub fn decode_batch(&self, blocks: &mut [Vec<u16>]) -> Vec<Result<usize>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            blocks
                .par_iter_mut()
                .map(|block| self.decode(block, &[]))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            blocks
                .iter_mut()
                .map(|block| self.decode(block, &[]))
                .collect()
        }
    }
}

impl ErrorCorrection for Pdf417Codec {
    fn encode(&self, data: &[u16]) -> Result<Vec<u16>> {
        encoder::encode(data, self.level.ecc_count())
    }

    fn decode(&self, received: &mut [u16], erasures: &[usize]) -> Result<usize> {
        let erased: BTreeSet<usize> = erasures.iter().copied().collect();
        if erased.len() > self.level.max_erasures() {
            return Err(Error::uncorrectable(format!(
                "{} erasures exceed the capacity of {} at {}",
                erased.len(),
                self.level.max_erasures(),
                self.level
            )));
        }

        let mut working = received.to_vec();
        let changed = decoder::decode(&mut working, self.level.ecc_count(), erasures)?;

        let substitutions = received
            .iter()
            .zip(working.iter())
            .enumerate()
            .filter(|(i, (before, after))| before != after && !erased.contains(i))
            .count();
        if !self.level.can_correct(erased.len(), substitutions) {
            debug!(
                "rejecting correction of {} errors and {} erasures at {}",
                substitutions,
                erased.len(),
                self.level
            );
            return Err(Error::uncorrectable(format!(
                "{} errors and {} erasures exceed the capacity of {} at {}",
                substitutions,
                erased.len(),
                self.level.correction_capacity(),
                self.level
            )));
        }

        received.copy_from_slice(&working);
        Ok(changed)
    }
}
