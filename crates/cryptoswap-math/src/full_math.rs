//! Multiplication and division with a full 512-bit intermediate product.
//!
//! The product `a * b` is kept as two 256-bit limbs `[prod1 prod0]`. The high
//! limb is recovered from `a * b mod 2^256` and `a * b mod (2^256 - 1)` via the
//! Chinese remainder theorem, and the division is an exact multiplication by
//! the modular inverse of the (odd part of the) denominator. This allows
//! computing `floor(a * b / denominator)` whenever the quotient itself fits in
//! 256 bits, even if the product does not.

use {
    super::{arith::SafeU256, error::Error},
    primitive_types::U256,
};

/// Calculates `floor(a * b / denominator)` with full precision.
///
/// Fails with [`Error::Overflow`] if `denominator` is zero or the result does
/// not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, Error> {
    if denominator.is_zero() {
        return Err(Error::Overflow);
    }

    let (prod0, overflowed) = a.overflowing_mul(b);
    if !overflowed {
        return Ok(prod0 / denominator);
    }

    let mm = mul_mod(a, b, U256::MAX)?;
    let mut prod1 = mm.overflowing_sub(prod0).0;
    if mm < prod0 {
        prod1 = prod1.overflowing_sub(U256::one()).0;
    }

    // The quotient is smaller than 2^256 iff denominator > prod1.
    if denominator <= prod1 {
        return Err(Error::Overflow);
    }

    // Make the division exact by subtracting the remainder from [prod1 prod0].
    let remainder = mul_mod(a, b, denominator)?;
    if remainder > prod0 {
        prod1 = prod1.overflowing_sub(U256::one()).0;
    }
    let mut prod0 = prod0.overflowing_sub(remainder).0;

    // Factor out the largest power of two dividing the denominator. `twos` is
    // always at least one.
    let twos = denominator & (!denominator).overflowing_add(U256::one()).0;
    let denominator = denominator / twos;
    prod0 = prod0 / twos;

    // Shift the bits of prod1 into prod0. For this `twos` is flipped to
    // `2^256 / twos`, which wraps to zero when `twos` is one.
    let flipped = (U256::zero().overflowing_sub(twos).0 / twos)
        .overflowing_add(U256::one())
        .0;
    prod0 = prod0 | prod1.overflowing_mul(flipped).0;

    // The denominator is now odd and therefore invertible modulo 2^256. The
    // seed is correct to four bits, and every Newton-Raphson step doubles the
    // number of correct bits: 8, 16, 32, 64, 128, 256.
    let two = U256::from(2);
    let mut inverse = U256::from(3).overflowing_mul(denominator).0 ^ two;
    for _ in 0..6 {
        let correction = two.overflowing_sub(denominator.overflowing_mul(inverse).0).0;
        inverse = inverse.overflowing_mul(correction).0;
    }

    // The division is exact, so multiplying by the inverse modulo 2^256 yields
    // the quotient, and the quotient is known to be below 2^256.
    Ok(prod0.overflowing_mul(inverse).0)
}

/// Calculates `ceil(a * b / denominator)` with full precision.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, Error> {
    let result = mul_div(a, b, denominator)?;
    if mul_mod(a, b, denominator)?.is_zero() {
        Ok(result)
    } else {
        result.safe_add(U256::one())
    }
}

/// Calculates `a * b mod modulus` without overflowing.
///
/// Products that do not fit in 256 bits are reduced by binary double-and-add,
/// which takes at most 256 rounds.
pub fn mul_mod(a: U256, b: U256, modulus: U256) -> Result<U256, Error> {
    if modulus.is_zero() {
        return Err(Error::Overflow);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product % modulus);
    }

    let mut addend = a % modulus;
    let mut result = U256::zero();
    for bit in 0..b.bits() {
        if b.bit(bit) {
            result = add_mod(result, addend, modulus);
        }
        addend = add_mod(addend, addend, modulus);
    }
    Ok(result)
}

/// `a + b mod modulus` for `a, b < modulus`.
fn add_mod(a: U256, b: U256, modulus: U256) -> U256 {
    let (sum, overflowed) = a.overflowing_add(b);
    if overflowed || sum >= modulus {
        sum.overflowing_sub(modulus).0
    } else {
        sum
    }
}
