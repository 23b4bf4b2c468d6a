//! Immutable polynomials with coefficients in GF(929).
//!
//! Coefficients are stored highest degree first, so a received PDF417 block can be
//! turned into a polynomial without reordering: `codewords[0]` is the leading term.
//! Every operation returns a new polynomial and leaves its operands untouched.

use crate::ecc::field::ModulusField;
use crate::error::{Error, Result};

/// A polynomial over a [`ModulusField`]
///
/// The leading coefficient is non-zero unless the polynomial is zero, in which
/// case the coefficient vector is exactly `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulusPoly<'a> {
    field: &'a ModulusField,
    coefficients: Vec<u16>,
}

impl<'a> ModulusPoly<'a> {
    /// Create a polynomial from coefficients ordered highest degree first.
    ///
    /// Leading zeros are stripped; an empty slice gives the zero polynomial.
    pub fn new(field: &'a ModulusField, coefficients: Vec<u16>) -> Self {
        debug_assert!(coefficients.iter().all(|&c| field.contains(c)));
        let first_non_zero = coefficients.iter().position(|&c| c != 0);
        let coefficients = match first_non_zero {
            Some(0) => coefficients,
            Some(start) => coefficients[start..].to_vec(),
            None => vec![0],
        };
        ModulusPoly {
            field,
            coefficients,
        }
    }

    pub fn zero(field: &'a ModulusField) -> Self {
        ModulusPoly {
            field,
            coefficients: vec![0],
        }
    }

    pub fn one(field: &'a ModulusField) -> Self {
        ModulusPoly {
            field,
            coefficients: vec![1],
        }
    }

    /// `coefficient * x^degree`
    pub fn monomial(field: &'a ModulusField, degree: usize, coefficient: u16) -> Self {
        if coefficient == 0 {
            return Self::zero(field);
        }
        let mut coefficients = vec![0u16; degree + 1];
        coefficients[0] = coefficient;
        ModulusPoly {
            field,
            coefficients,
        }
    }

    /// Build the erasure locator `prod (1 - X_e x)` for the given block positions.
    ///
    /// Position `i` of a block of `block_len` codewords has locator
    /// `X = alpha^(block_len - 1 - i)`, so the roots of the result are the inverses
    /// of the erased positions' locators.
    pub fn erasure_locator(field: &'a ModulusField, positions: &[usize], block_len: usize) -> Self {
        positions
            .iter()
            .fold(Self::one(field), |locator, &position| {
                debug_assert!(position < block_len);
                let locator_value = field.exp(block_len - 1 - position);
                let term = ModulusPoly::new(field, vec![field.negate(locator_value), 1]);
                locator.multiply(&term)
            })
    }

    pub fn field(&self) -> &'a ModulusField {
        self.field
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u16] {
        &self.coefficients
    }

    /// Degree of the polynomial. The zero polynomial reports 0; use [`is_zero`](Self::is_zero)
    /// to tell it apart from a non-zero constant.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    /// Coefficient of `x^degree`
    pub fn coefficient(&self, degree: usize) -> u16 {
        if degree > self.degree() {
            return 0;
        }
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    /// Leading coefficient
    pub fn leading_coefficient(&self) -> u16 {
        self.coefficients[0]
    }

    /// Evaluate at `x` using Horner's rule
    pub fn evaluate_at(&self, x: u16) -> u16 {
        if x == 0 {
            return self.coefficient(0);
        }
        self.coefficients
            .iter()
            .fold(0, |acc, &c| self.field.add(self.field.multiply(acc, x), c))
    }

    pub fn add(&self, other: &ModulusPoly<'a>) -> ModulusPoly<'a> {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let (longer, shorter) = if self.coefficients.len() >= other.coefficients.len() {
            (&self.coefficients, &other.coefficients)
        } else {
            (&other.coefficients, &self.coefficients)
        };
        let offset = longer.len() - shorter.len();

        let mut sum = longer.clone();
        for (i, &c) in shorter.iter().enumerate() {
            sum[offset + i] = self.field.add(sum[offset + i], c);
        }
        ModulusPoly::new(self.field, sum)
    }

    pub fn negate(&self) -> ModulusPoly<'a> {
        let negated = self
            .coefficients
            .iter()
            .map(|&c| self.field.negate(c))
            .collect();
        ModulusPoly::new(self.field, negated)
    }

    pub fn subtract(&self, other: &ModulusPoly<'a>) -> ModulusPoly<'a> {
        if other.is_zero() {
            return self.clone();
        }
        self.add(&other.negate())
    }

    /// Full product of two polynomials
    pub fn multiply(&self, other: &ModulusPoly<'a>) -> ModulusPoly<'a> {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.field);
        }

        let mut product = vec![0u16; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] = self.field.add(product[i + j], self.field.multiply(a, b));
            }
        }
        ModulusPoly::new(self.field, product)
    }

    /// Multiply every coefficient by `scalar`
    pub fn scale(&self, scalar: u16) -> ModulusPoly<'a> {
        if scalar == 0 {
            return Self::zero(self.field);
        }
        if scalar == 1 {
            return self.clone();
        }
        let scaled = self
            .coefficients
            .iter()
            .map(|&c| self.field.multiply(c, scalar))
            .collect();
        ModulusPoly::new(self.field, scaled)
    }

    /// `self * coefficient * x^degree`
    pub fn multiply_by_monomial(&self, degree: usize, coefficient: u16) -> ModulusPoly<'a> {
        if coefficient == 0 || self.is_zero() {
            return Self::zero(self.field);
        }
        let mut shifted = Vec::with_capacity(self.coefficients.len() + degree);
        shifted.extend(
            self.coefficients
                .iter()
                .map(|&c| self.field.multiply(c, coefficient)),
        );
        shifted.resize(self.coefficients.len() + degree, 0);
        ModulusPoly::new(self.field, shifted)
    }

    /// Long division, returning `(quotient, remainder)` with
    /// `self = quotient * divisor + remainder` and `deg(remainder) < deg(divisor)`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `divisor` is the zero polynomial.
    pub fn divide(&self, divisor: &ModulusPoly<'a>) -> Result<(ModulusPoly<'a>, ModulusPoly<'a>)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let lead_inverse = self.field.inverse(divisor.leading_coefficient())?;
        let mut quotient = Self::zero(self.field);
        let mut remainder = self.clone();

        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let degree_diff = remainder.degree() - divisor.degree();
            let scale = self
                .field
                .multiply(remainder.leading_coefficient(), lead_inverse);
            quotient = quotient.add(&Self::monomial(self.field, degree_diff, scale));
            remainder = remainder.subtract(&divisor.multiply_by_monomial(degree_diff, scale));
        }

        Ok((quotient, remainder))
    }

    /// Formal derivative `sum i * c_i * x^(i-1)`
    pub fn formal_derivative(&self) -> ModulusPoly<'a> {
        let degree = self.degree();
        if degree == 0 {
            return Self::zero(self.field);
        }
        let modulus = self.field.modulus() as usize;
        let derivative = (1..=degree)
            .rev()
            .map(|i| {
                self.field
                    .multiply((i % modulus) as u16, self.coefficient(i))
            })
            .collect();
        ModulusPoly::new(self.field, derivative)
    }
}
