//! Syndrome-based erasure and error correction for PDF417 codeword blocks.
//!
//! The received block is read as a polynomial over GF(929) whose leading
//! coefficient is `codewords[0]`. Decoding proceeds in the classical steps:
//!
//! 1. Syndromes `S_i = r(3^i)` for `i = 1..=k`. All zero means nothing to fix.
//! 2. The erasure locator `Γ(x)` is folded into the syndromes: `T = S·Γ mod x^k`.
//! 3. The extended Euclidean algorithm on `(x^k, T)` solves the key equation for
//!    the error locator `Λ` and evaluator `Ω`; the full locator is `Σ = Λ·Γ`.
//! 4. Σ is searched for roots over every non-zero field element.
//! 5. Forney's formula gives each magnitude as `-Ω(X⁻¹) / Σ'(X⁻¹)`.
//! 6. The syndromes of the corrected block are checked before anything is written back.
//!
//! Any `l` erasures and `f` errors with `2f + l <= k` are repaired. Beyond that
//! bound the decoder either reports [`Error::UncorrectableBlock`] or, as with any
//! Reed-Solomon code, may land on a different valid block. Use
//! [`Pdf417Codec`](crate::ecc::Pdf417Codec) to also enforce the stricter level bound.

use crate::ecc::encoder::MAX_CODEWORDS;
use crate::ecc::field::ModulusField;
use crate::ecc::polynomial::ModulusPoly;
use crate::error::{Error, Result};
use log::{debug, trace};
use std::collections::BTreeSet;

/// Correct `codewords` in place
///
/// # Arguments
/// * `codewords` - Data codewords followed by `ecc_count` ECC codewords
/// * `ecc_count` - Number of trailing ECC codewords
/// * `erasures` - Positions known to be unreliable; duplicates are ignored
///
/// # Returns
/// The number of codewords whose value was changed
///
/// # Errors
/// Returns `InvalidInput` for malformed arguments and `UncorrectableBlock` when the
/// block cannot be repaired. On error `codewords` is left exactly as it was passed in.
pub fn decode(codewords: &mut [u16], ecc_count: usize, erasures: &[usize]) -> Result<usize> {
    let field = ModulusField::pdf417();
    let erasures = validate(field, codewords, ecc_count, erasures)?;
    let block_len = codewords.len();

    let received = ModulusPoly::new(field, codewords.to_vec());
    let syndromes = compute_syndromes(&received, ecc_count);
    trace!("syndromes: {:?}", syndromes.coefficients());
    if syndromes.is_zero() {
        debug!("block of {} codewords has no errors", block_len);
        return Ok(0);
    }

    if erasures.len() > ecc_count {
        return Err(Error::uncorrectable(format!(
            "{} erasures exceed the {} ECC codewords",
            erasures.len(),
            ecc_count
        )));
    }

    let erasure_locator = ModulusPoly::erasure_locator(field, &erasures, block_len);
    let x_to_k = ModulusPoly::monomial(field, ecc_count, 1);
    let (_, folded) = syndromes.multiply(&erasure_locator).divide(&x_to_k)?;

    let (error_locator, error_evaluator) =
        run_euclidean_algorithm(x_to_k, folded, ecc_count + erasures.len())?;
    let locator = error_locator.multiply(&erasure_locator);
    trace!(
        "locator degree {} ({} erasures), evaluator degree {}",
        locator.degree(),
        erasures.len(),
        error_evaluator.degree()
    );

    let roots = find_error_roots(&locator, block_len)?;
    let magnitudes = find_error_magnitudes(&error_evaluator, &locator, &roots)?;

    let mut corrected = codewords.to_vec();
    let mut changed = 0;
    for (&(position, _), &magnitude) in roots.iter().zip(magnitudes.iter()) {
        if magnitude != 0 {
            corrected[position] = field.subtract(corrected[position], magnitude);
            changed += 1;
        }
    }

    let check = ModulusPoly::new(field, corrected.clone());
    if !compute_syndromes(&check, ecc_count).is_zero() {
        return Err(Error::uncorrectable(
            "syndromes are non-zero after correction",
        ));
    }

    codewords.copy_from_slice(&corrected);
    debug!(
        "corrected {} of {} codewords ({} erasures declared)",
        changed,
        block_len,
        erasures.len()
    );
    Ok(changed)
}

/// Whether `codewords` is a valid block, i.e. every syndrome is zero
pub fn is_consistent(codewords: &[u16], ecc_count: usize) -> bool {
    let field = ModulusField::pdf417();
    if codewords.iter().any(|&c| !field.contains(c)) {
        return false;
    }
    let received = ModulusPoly::new(field, codewords.to_vec());
    compute_syndromes(&received, ecc_count).is_zero()
}

fn validate(
    field: &ModulusField,
    codewords: &[u16],
    ecc_count: usize,
    erasures: &[usize],
) -> Result<Vec<usize>> {
    if codewords.len() > MAX_CODEWORDS {
        return Err(Error::InputTooLarge {
            length: codewords.len(),
            max_length: MAX_CODEWORDS,
        });
    }
    if ecc_count == 0 || ecc_count >= codewords.len() {
        return Err(Error::InvalidInput(format!(
            "ECC count {} must be between 1 and {} for a block of {} codewords",
            ecc_count,
            codewords.len().saturating_sub(1),
            codewords.len()
        )));
    }
    if let Some(position) = codewords.iter().position(|&c| !field.contains(c)) {
        return Err(Error::InvalidInput(format!(
            "Codeword {} at position {} is outside GF({})",
            codewords[position],
            position,
            field.modulus()
        )));
    }
    if let Some(&position) = erasures.iter().find(|&&e| e >= codewords.len()) {
        return Err(Error::InvalidInput(format!(
            "Erasure position {} is outside a block of {} codewords",
            position,
            codewords.len()
        )));
    }

    let unique: BTreeSet<usize> = erasures.iter().copied().collect();
    Ok(unique.into_iter().collect())
}

/// Syndrome polynomial with `S_k` as leading coefficient and `S_1` as constant term
fn compute_syndromes<'a>(received: &ModulusPoly<'a>, ecc_count: usize) -> ModulusPoly<'a> {
    let field = received.field();
    let syndromes = (1..=ecc_count)
        .rev()
        .map(|i| received.evaluate_at(field.exp(i)))
        .collect();
    ModulusPoly::new(field, syndromes)
}

/// Solve the key equation `Λ·T ≡ Ω (mod x^k)`
///
/// Runs the remainder sequence of `a` and `b` while tracking the Bézout coefficient
/// of `b`, stopping once `2·deg(r) < bound` where `bound = k + erasures`. Returns
/// `(Λ, Ω)` scaled so that `Λ(0) = 1`.
fn run_euclidean_algorithm<'a>(
    a: ModulusPoly<'a>,
    b: ModulusPoly<'a>,
    bound: usize,
) -> Result<(ModulusPoly<'a>, ModulusPoly<'a>)> {
    let field = a.field();
    let (mut r_last, mut r) = if a.degree() < b.degree() {
        (b, a)
    } else {
        (a, b)
    };
    let mut t_last = ModulusPoly::zero(field);
    let mut t = ModulusPoly::one(field);

    while !r.is_zero() && 2 * r.degree() >= bound {
        let (quotient, remainder) = r_last.divide(&r)?;
        let t_next = t_last.subtract(&quotient.multiply(&t));
        r_last = std::mem::replace(&mut r, remainder);
        t_last = std::mem::replace(&mut t, t_next);
    }

    let t_at_zero = t.coefficient(0);
    if t_at_zero == 0 {
        return Err(Error::uncorrectable("error locator has no constant term"));
    }
    let inverse = field.inverse(t_at_zero)?;
    Ok((t.scale(inverse), r.scale(inverse)))
}

/// Find the roots of the locator and map them to block positions.
///
/// Returns `(position, root)` pairs where `root = X⁻¹` for the position's locator `X`.
fn find_error_roots(locator: &ModulusPoly<'_>, block_len: usize) -> Result<Vec<(usize, u16)>> {
    let field = locator.field();
    let expected = locator.degree();
    let mut roots = Vec::with_capacity(expected);

    for x in 1..field.modulus() {
        if roots.len() == expected {
            break;
        }
        if locator.evaluate_at(x) != 0 {
            continue;
        }
        let power = field.log(field.inverse(x)?)?;
        if power >= block_len {
            return Err(Error::uncorrectable(format!(
                "error located outside the block (power {} for {} codewords)",
                power, block_len
            )));
        }
        roots.push((block_len - 1 - power, x));
    }

    if roots.len() != expected {
        return Err(Error::uncorrectable(format!(
            "error locator of degree {} has {} roots",
            expected,
            roots.len()
        )));
    }
    Ok(roots)
}

/// Forney's formula: `e = -Ω(X⁻¹) / Σ'(X⁻¹)`
fn find_error_magnitudes(
    evaluator: &ModulusPoly<'_>,
    locator: &ModulusPoly<'_>,
    roots: &[(usize, u16)],
) -> Result<Vec<u16>> {
    let field = locator.field();
    let derivative = locator.formal_derivative();

    roots
        .iter()
        .map(|&(position, root)| {
            let denominator = derivative.evaluate_at(root);
            if denominator == 0 {
                return Err(Error::uncorrectable(format!(
                    "repeated error locator root at position {}",
                    position
                )));
            }
            let numerator = field.negate(evaluator.evaluate_at(root));
            field.divide(numerator, denominator)
        })
        .collect()
}
