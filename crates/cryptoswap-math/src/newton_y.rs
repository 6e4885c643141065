//! Newton's method for a single balance given the invariant.

use {
    super::{
        arith::{SafeU256, signed_sub},
        constants::{E14, MAX_D, MAX_FRAC, MAX_ITERATIONS, MIN_D, MIN_FRAC, N_COINS, WAD},
        error::{Error, Solver},
        full_math::mul_div,
        newton_d::{g1k0, mul1},
        params::validate,
    },
    primitive_types::U256,
    std::cmp,
};

/// Computes the balance `x[i]` that keeps the invariant at `d` given the
/// other balance `x[1 - i]`. The value currently stored in `x[i]` is ignored.
///
/// When a raw Newton step would leave the positive domain the previous
/// iterate is halved instead.
pub fn newton_y(ann: U256, gamma: U256, x: [U256; 2], d: U256, i: usize) -> Result<U256, Error> {
    validate(ann, gamma)?;
    if d < *MIN_D || d > *MAX_D {
        tracing::debug!(%d, "unsafe invariant");
        return Err(Error::UnsafeD);
    }
    if i >= N_COINS {
        return Err(Error::InvalidIndex);
    }

    let n = U256::from(N_COINS);
    let x_j = x[1 - i];

    // K0_i = N * x_j / D, i.e. N times the fraction of D held by x_j.
    let k0_i = mul_div(WAD.safe_mul(n)?, x_j, d)?;
    if k0_i < MIN_FRAC.safe_mul(n)? || k0_i > MAX_FRAC.safe_mul(n)? {
        tracing::debug!(%x_j, %d, "unsafe balance for invariant");
        return Err(Error::UnsafeBalance);
    }

    // Constant product guess: y = D**2 / (x_j * N**N)
    let mut y = mul_div(d, d, x_j.safe_mul(n.safe_mul(n)?)?)?;
    let convergence_limit = cmp::max(
        cmp::max(x_j / *E14, d / *E14),
        U256::from(100),
    );

    for iteration in 0..MAX_ITERATIONS {
        let y_prev = y;

        let k0 = mul_div(k0_i, y.safe_mul(n)?, d)?;
        let s = x_j.safe_add(y)?;

        let g1k0 = g1k0(gamma, k0)?;
        let mul1 = mul1(ann, gamma, d, g1k0)?;
        // 1 + 2 * K0 / g1k0
        let mul2 = WAD.safe_add(mul_div(WAD.safe_mul(U256::from(2))?, k0, g1k0)?)?;

        let yfprime = WAD
            .safe_mul(y)?
            .safe_add(s.safe_mul(mul2)?)?
            .safe_add(mul1)?;
        let dyfprime = d.safe_mul(mul2)?;
        let yfprime = match signed_sub(yfprime, dyfprime) {
            (yfprime, false) => yfprime,
            (_, true) => {
                y = y_prev / U256::from(2);
                continue;
            }
        };
        let fprime = yfprime.safe_div(y)?;

        // y -= f / fprime, split so that both sides stay positive.
        let mut y_minus = mul1.safe_div(fprime)?;
        let y_plus = yfprime
            .safe_add(WAD.safe_mul(d)?)?
            .safe_div(fprime)?
            .safe_add(mul_div(y_minus, *WAD, k0)?)?;
        y_minus = y_minus.safe_add(mul_div(*WAD, s, fprime)?)?;

        y = match signed_sub(y_plus, y_minus) {
            (y, false) => y,
            (_, true) => y_prev / U256::from(2),
        };

        let (diff, _) = signed_sub(y, y_prev);
        if diff < cmp::max(convergence_limit, y / *E14) {
            let frac = mul_div(y, *WAD, d)?;
            if frac < *MIN_FRAC || frac > *MAX_FRAC {
                tracing::debug!(%y, %d, "unsafe value for y");
                return Err(Error::UnsafeY);
            }
            tracing::trace!(iteration, %y, "newton_y converged");
            return Ok(y);
        }
    }

    tracing::debug!(%ann, %gamma, %x_j, %d, "newton_y did not converge");
    Err(Error::DidNotConverge(Solver::NewtonY))
}
