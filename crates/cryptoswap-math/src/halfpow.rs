use {
    super::{
        arith::SafeU256,
        constants::{EXP_PRECISION, WAD},
        error::{Error, Solver},
        full_math::mul_div,
    },
    primitive_types::U256,
};

/// Approximates `10**18 * 0.5 ** (power / 10**18)`.
///
/// The integer part of the exponent is applied as a shift. The fractional
/// part is evaluated with the binomial series of `(1 - 0.5) ** f` until a
/// term drops below `EXP_PRECISION`.
pub fn halfpow(power: U256) -> Result<U256, Error> {
    let intpow = power / *WAD;
    let otherpow = power - intpow * *WAD;
    if intpow > U256::from(59) {
        return Ok(U256::zero());
    }
    let result = *WAD / U256::from(2).pow(intpow);
    if otherpow.is_zero() {
        return Ok(result);
    }

    let x = *WAD / U256::from(2);
    let mut term = *WAD;
    let mut sum = *WAD;
    let mut neg = false;

    for i in 1..256_u64 {
        let k = U256::from(i).safe_mul(*WAD)?;
        let mut c = k - *WAD;
        if otherpow > c {
            c = otherpow - c;
            neg = !neg;
        } else {
            c -= otherpow;
        }
        term = mul_div(term, mul_div(c, x, *WAD)?, k)?;
        sum = if neg {
            sum.safe_sub(term)?
        } else {
            sum.safe_add(term)?
        };
        if term < *EXP_PRECISION {
            tracing::trace!(terms = i, %sum, "halfpow converged");
            return mul_div(result, sum, *WAD);
        }
    }

    tracing::debug!(%power, "halfpow did not converge");
    Err(Error::DidNotConverge(Solver::Halfpow))
}
