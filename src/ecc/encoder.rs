//! Generation of PDF417 error correction codewords.
//!
//! The ECC codewords are the negated remainder of `data(x) * x^k` divided by the
//! generator `g(x) = (x - 3)(x - 3^2)...(x - 3^k)`. The full block is therefore a
//! multiple of `g(x)` and evaluates to zero at `3^1 ... 3^k`, which is what the
//! decoder's syndromes check.

use crate::ecc::field::ModulusField;
use crate::ecc::polynomial::ModulusPoly;
use crate::error::{Error, Result};

/// Most codewords a PDF417 symbol can hold, data and ECC together
pub const MAX_CODEWORDS: usize = 928;

/// Build the generator polynomial `prod_{i=1..=ecc_count} (x - alpha^i)`
pub fn generator_polynomial(field: &ModulusField, ecc_count: usize) -> ModulusPoly<'_> {
    (1..=ecc_count).fold(ModulusPoly::one(field), |generator, i| {
        let factor = ModulusPoly::new(field, vec![1, field.negate(field.exp(i))]);
        generator.multiply(&factor)
    })
}

/// Compute the `ecc_count` error correction codewords for `data`
///
/// # Arguments
/// * `data` - Data codewords, each below 929
/// * `ecc_count` - Number of ECC codewords to produce
///
/// # Errors
/// Returns an error if the data is empty, holds values outside GF(929), or would
/// not fit in a symbol together with its ECC codewords.
pub fn generate_ecc(data: &[u16], ecc_count: usize) -> Result<Vec<u16>> {
    let field = ModulusField::pdf417();

    if data.is_empty() {
        return Err(Error::InvalidInput(
            "Data must contain at least one codeword".to_string(),
        ));
    }
    if ecc_count == 0 {
        return Err(Error::InvalidInput("ECC count must be positive".to_string()));
    }
    if data.len() + ecc_count > MAX_CODEWORDS {
        return Err(Error::InputTooLarge {
            length: data.len() + ecc_count,
            max_length: MAX_CODEWORDS,
        });
    }
    if let Some(&bad) = data.iter().find(|&&c| !field.contains(c)) {
        return Err(Error::InvalidInput(format!(
            "Codeword {} is outside GF({})",
            bad,
            field.modulus()
        )));
    }

    let generator = generator_polynomial(field, ecc_count);
    let message = ModulusPoly::new(field, data.to_vec()).multiply_by_monomial(ecc_count, 1);
    let (_, remainder) = message.divide(&generator)?;

    let mut ecc = vec![0u16; ecc_count];
    if !remainder.is_zero() {
        for degree in 0..=remainder.degree() {
            ecc[ecc_count - 1 - degree] = field.negate(remainder.coefficient(degree));
        }
    }
    Ok(ecc)
}

/// Append the ECC codewords for `data`, returning the full block
pub fn encode(data: &[u16], ecc_count: usize) -> Result<Vec<u16>> {
    let ecc = generate_ecc(data, ecc_count)?;
    let mut block = Vec::with_capacity(data.len() + ecc_count);
    block.extend_from_slice(data);
    block.extend_from_slice(&ecc);
    Ok(block)
}
