//! Arithmetic in the prime field GF(929) used by PDF417.
//!
//! PDF417 codewords are integers in `[0, 929)`. Unlike the GF(2^8) fields used by
//! QR codes or CDs, 929 is prime, so addition is ordinary modular addition and
//! subtraction is not the same operation as addition.
//!
//! Multiplication and inversion go through discrete log/antilog tables built by
//! walking the powers of the primitive element 3. The tables for GF(929) are built
//! once per process and shared read-only by every decode call.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;

/// Order of the PDF417 field
pub const MODULUS: u16 = 929;

/// Primitive element of GF(929) used by PDF417 (alpha = 3)
pub const GENERATOR: u16 = 3;

static PDF417_FIELD: Lazy<ModulusField> = Lazy::new(|| {
    // The parameters are fixed, so a failure here is a broken build rather than bad input.
    ModulusField::new(MODULUS, GENERATOR)
        .unwrap_or_else(|e| panic!("GF({}) tables failed to build: {}", MODULUS, e))
});

/// A prime field GF(p) with precomputed exponent and logarithm tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulusField {
    /// Prime order of the field
    modulus: u16,
    /// Primitive element generating the multiplicative group
    generator: u16,
    /// `exp_table[i] = generator^i`
    exp_table: Vec<u16>,
    /// `log_table[generator^i] = i`; entry 0 is unused
    log_table: Vec<u16>,
}

impl ModulusField {
    /// Build the field GF(`modulus`) with `generator` as its primitive element.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `modulus < 3`, if `generator` is not a field
    /// element, or if its powers do not reach all `modulus - 1` non-zero elements.
    pub fn new(modulus: u16, generator: u16) -> Result<Self> {
        if modulus < 3 {
            return Err(Error::InvalidInput(format!(
                "Field modulus must be at least 3, got {}",
                modulus
            )));
        }
        if generator == 0 || generator >= modulus {
            return Err(Error::InvalidInput(format!(
                "Generator {} is not a non-zero element of GF({})",
                generator, modulus
            )));
        }

        let size = modulus as usize;
        let mut exp_table = vec![0u16; size];
        let mut log_table = vec![0u16; size];
        let mut seen = vec![false; size];

        let mut x: u32 = 1;
        for (i, exp_val) in exp_table.iter_mut().enumerate() {
            *exp_val = x as u16;
            x = (x * generator as u32) % modulus as u32;
            if i < size - 1 {
                if seen[*exp_val as usize] {
                    return Err(Error::InvalidInput(format!(
                        "{} is not a primitive element of GF({}): order {}",
                        generator, modulus, i
                    )));
                }
                seen[*exp_val as usize] = true;
            }
        }

        // The walk wraps back to 1 after modulus - 1 steps for a primitive element.
        for (i, &value) in exp_table.iter().enumerate().take(size - 1) {
            log_table[value as usize] = i as u16;
        }

        Ok(ModulusField {
            modulus,
            generator,
            exp_table,
            log_table,
        })
    }

    /// The shared GF(929) instance used for PDF417
    pub fn pdf417() -> &'static ModulusField {
        &PDF417_FIELD
    }

    /// Order of the field
    pub fn modulus(&self) -> u16 {
        self.modulus
    }

    /// Primitive element used to build the tables
    pub fn generator(&self) -> u16 {
        self.generator
    }

    /// Whether `value` is a reduced element of this field
    pub fn contains(&self, value: u16) -> bool {
        value < self.modulus
    }

    pub fn add(&self, a: u16, b: u16) -> u16 {
        ((a as u32 + b as u32) % self.modulus as u32) as u16
    }

    pub fn subtract(&self, a: u16, b: u16) -> u16 {
        ((self.modulus as u32 + a as u32 - b as u32) % self.modulus as u32) as u16
    }

    /// Additive inverse
    pub fn negate(&self, a: u16) -> u16 {
        self.subtract(0, a)
    }

    /// Multiply two elements through the log tables
    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let order = self.modulus as usize - 1;
        let log_sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[log_sum % order]
    }

    /// `generator^power`, with the exponent taken modulo `modulus - 1`
    pub fn exp(&self, power: usize) -> u16 {
        self.exp_table[power % (self.modulus as usize - 1)]
    }

    /// Discrete logarithm of a non-zero element
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for 0, which has no logarithm.
    pub fn log(&self, a: u16) -> Result<usize> {
        if a == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(self.log_table[a as usize] as usize)
    }

    /// Multiplicative inverse
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `a` is 0.
    pub fn inverse(&self, a: u16) -> Result<u16> {
        if a == 0 {
            return Err(Error::DivisionByZero);
        }
        let order = self.modulus as usize - 1;
        Ok(self.exp_table[order - self.log_table[a as usize] as usize])
    }

    /// `a / b`
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `b` is 0.
    pub fn divide(&self, a: u16, b: u16) -> Result<u16> {
        Ok(self.multiply(a, self.inverse(b)?))
    }

    /// Raise `a` to a non-negative power. `0^0` is 1.
    pub fn pow(&self, a: u16, power: usize) -> u16 {
        if power == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let order = self.modulus as usize - 1;
        let log_a = self.log_table[a as usize] as usize;
        self.exp_table[(log_a * (power % order)) % order]
    }
}
