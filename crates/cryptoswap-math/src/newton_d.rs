//! Newton's method for the invariant `D` of a two coin cryptoswap curve.
//!
//! The invariant solves
//!
//! ```text
//! K * D * S + P = K * D^2 + (D / 2)^2
//! K = ANN * K0 * gamma^2 / (gamma + 1 - K0)^2 / A_MULTIPLIER
//! K0 = 4 * P / D^2
//! ```
//!
//! with `S = x[0] + x[1]` and `P = x[0] * x[1]`. Every intermediate value is
//! a `WAD` fixed point number and divisions are staged so that the products
//! stay within 256 bits for all inputs inside the validated domain.

use {
    super::{
        arith::{SafeU256, signed_sub},
        constants::{
            A_MULTIPLIER,
            E14,
            E16,
            MAX_FRAC,
            MAX_ITERATIONS,
            MAX_X0,
            MIN_FRAC,
            MIN_X_RATIO,
            MIN_X0,
            N_COINS,
            WAD,
        },
        error::{Error, Solver},
        full_math::mul_div,
        geometric_mean::geometric_mean,
        params::validate,
    },
    primitive_types::U256,
    std::cmp,
};

/// Computes the invariant `D` for the balances `x_unsorted`.
pub fn newton_d(ann: U256, gamma: U256, x_unsorted: [U256; 2]) -> Result<U256, Error> {
    validate(ann, gamma)?;

    let x = if x_unsorted[0] < x_unsorted[1] {
        [x_unsorted[1], x_unsorted[0]]
    } else {
        x_unsorted
    };
    if x[0] < *MIN_X0 || x[0] > *MAX_X0 {
        tracing::debug!(x0 = %x[0], "unsafe x[0]");
        return Err(Error::UnsafeX0);
    }
    if mul_div(x[1], *WAD, x[0])? < *MIN_X_RATIO {
        tracing::debug!(x0 = %x[0], x1 = %x[1], "unsafe balance ratio");
        return Err(Error::UnsafeXRatio);
    }

    // Start from the constant product invariant.
    let mut d = geometric_mean(x, false)?.safe_mul(U256::from(N_COINS))?;
    let s = x[0].safe_add(x[1])?;

    for iteration in 0..MAX_ITERATIONS {
        let d_prev = d;
        d = newton_step(ann, gamma, x, s, d)?;

        let (diff, _) = signed_sub(d, d_prev);
        if diff.safe_mul(*E14)? < cmp::max(*E16, d) {
            // The balance solver is only safe for balances within this window.
            for balance in x {
                let frac = mul_div(balance, *WAD, d)?;
                if frac < *MIN_FRAC || frac > *MAX_FRAC {
                    tracing::debug!(%balance, %d, "unsafe balance for invariant");
                    return Err(Error::UnsafeBalance);
                }
            }
            tracing::trace!(iteration, %d, "newton_d converged");
            return Ok(d);
        }
    }

    tracing::debug!(%ann, %gamma, x0 = %x[0], x1 = %x[1], "newton_d did not converge");
    Err(Error::DidNotConverge(Solver::NewtonD))
}

/// One Newton-Raphson update of `d` for the descending balances `x` with sum
/// `s`.
fn newton_step(ann: U256, gamma: U256, x: [U256; 2], s: U256, d: U256) -> Result<U256, Error> {
    let n = U256::from(N_COINS);

    // K0 = (10**18 * N**N) * x[0] / D * x[1] / D
    let k0 = mul_div(
        mul_div(WAD.safe_mul(n.safe_mul(n)?)?, x[0], d)?,
        x[1],
        d,
    )?;
    let g1k0 = g1k0(gamma, k0)?;
    let mul1 = mul1(ann, gamma, d, g1k0)?;
    // 2 * N * K0 / g1k0
    let mul2 = mul_div(WAD.safe_mul(U256::from(2))?.safe_mul(n)?, k0, g1k0)?;

    let neg_fprime = s
        .safe_add(mul_div(s, mul2, *WAD)?)?
        .safe_add(mul1.safe_mul(n)?.safe_div(k0)?)?
        .safe_sub(mul_div(mul2, d, *WAD)?)?;

    // D -= f / fprime, split so that both sides stay positive.
    let d_plus = mul_div(d, neg_fprime.safe_add(s)?, neg_fprime)?;
    let mut d_minus = mul_div(d, d, neg_fprime)?;
    let (k0_gap, k0_above_one) = signed_sub(*WAD, k0);
    let correction = mul_div(
        mul_div(d, mul1.safe_div(neg_fprime)?, *WAD)?,
        k0_gap,
        k0,
    )?;
    d_minus = if k0_above_one {
        d_minus.safe_sub(correction)?
    } else {
        d_minus.safe_add(correction)?
    };

    Ok(match signed_sub(d_plus, d_minus) {
        (d, false) => d,
        (overshoot, true) => overshoot / U256::from(2),
    })
}

/// `|gamma + 1 - K0| + 1`
pub(crate) fn g1k0(gamma: U256, k0: U256) -> Result<U256, Error> {
    let (gap, _) = signed_sub(gamma.safe_add(*WAD)?, k0);
    gap.safe_add(U256::one())
}

/// `D / (A * N**N) * g1k0**2 / gamma**2`, with `ANN` carrying the
/// `A_MULTIPLIER` scale.
pub(crate) fn mul1(ann: U256, gamma: U256, d: U256, g1k0: U256) -> Result<U256, Error> {
    let scaled = mul_div(mul_div(*WAD, d, gamma)?, g1k0, gamma)?;
    mul_div(scaled.safe_mul(g1k0)?, *A_MULTIPLIER, ann)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::constants::{MAX_A, MAX_GAMMA, MIN_A, MIN_GAMMA},
    };

    fn e(exponent: usize) -> U256 {
        U256::exp10(exponent)
    }

    #[test]
    fn balanced_pool_is_constant_sum() {
        let d = newton_d(*MIN_A, *MIN_GAMMA, [e(24), e(24)]).unwrap();
        assert_eq!(d, U256::from(2) * e(24));

        for (ann, gamma) in [
            (U256::from(400_000), U256::from(145_000_000_000_000_u64)),
            (*MAX_A, *MAX_GAMMA),
        ] {
            for x in [e(18), e(24), e(33)] {
                assert_eq!(newton_d(ann, gamma, [x, x]), Ok(U256::from(2) * x));
            }
        }
    }

    #[test]
    fn imbalanced_pool() {
        let ann = U256::from(400_000);
        let gamma = U256::from(145_000_000_000_000_u64);
        let d = newton_d(ann, gamma, [e(24), U256::from(3) * e(23)]).unwrap();
        assert_eq!(
            d,
            U256::from_dec_str("1098337140632821395123161").unwrap()
        );
        // Order of the balances does not matter.
        assert_eq!(newton_d(ann, gamma, [U256::from(3) * e(23), e(24)]), Ok(d));
    }

    #[test]
    fn invariant_lies_between_product_and_sum() {
        let x = [U256::from(5) * e(21), e(24)];
        let product_d = U256::from(2) * geometric_mean(x, true).unwrap();
        let sum_d = x[0] + x[1];
        for (ann, gamma) in [
            (*MIN_A, *MIN_GAMMA),
            (U256::from(5_400_000), U256::from(2) * e(15)),
        ] {
            let d = newton_d(ann, gamma, x).unwrap();
            assert!(product_d <= d && d <= sum_d, "{d}");
        }
    }

    #[test]
    fn converged_invariant_is_a_fixed_point() {
        for (ann, gamma) in [
            (*MIN_A, *MIN_GAMMA),
            (U256::from(400_000), U256::from(145_000_000_000_000_u64)),
            (*MAX_A, *MAX_GAMMA),
        ] {
            for x in [
                [e(24), U256::from(3) * e(23)],
                [e(18), U256::from(2) * e(18)],
                [e(24), e(22)],
            ] {
                let d = newton_d(ann, gamma, x).unwrap();
                let sorted = if x[0] < x[1] { [x[1], x[0]] } else { x };
                let next = newton_step(ann, gamma, sorted, x[0] + x[1], d).unwrap();
                let (diff, _) = signed_sub(next, d);
                assert!(diff * *E14 < cmp::max(*E16, next), "{x:?}: {d} -> {next}");
            }
        }
    }

    #[test]
    fn rejects_unsafe_parameters() {
        let x = [e(24), e(24)];
        assert_eq!(
            newton_d(*MIN_A - U256::one(), *MIN_GAMMA, x),
            Err(Error::UnsafeA)
        );
        assert_eq!(
            newton_d(*MAX_A + U256::one(), *MIN_GAMMA, x),
            Err(Error::UnsafeA)
        );
        assert_eq!(
            newton_d(*MIN_A, *MIN_GAMMA - U256::one(), x),
            Err(Error::UnsafeGamma)
        );
        assert_eq!(
            newton_d(*MIN_A, *MAX_GAMMA + U256::one(), x),
            Err(Error::UnsafeGamma)
        );
    }

    #[test]
    fn rejects_unsafe_balances() {
        let (ann, gamma) = (U256::from(400_000), U256::from(145_000_000_000_000_u64));
        assert_eq!(
            newton_d(ann, gamma, [e(9) - U256::one(), e(9) - U256::one()]),
            Err(Error::UnsafeX0)
        );
        assert_eq!(
            newton_d(ann, gamma, [e(33) + U256::one(), e(33)]),
            Err(Error::UnsafeX0)
        );
        assert_eq!(
            newton_d(ann, gamma, [e(24), e(10)]),
            Err(Error::UnsafeXRatio)
        );
        assert_eq!(newton_d(ann, gamma, [e(24), U256::zero()]), Err(Error::UnsafeXRatio));
        // Accepted as input, but the resulting invariant leaves x[1] too small
        // for the balance solver.
        assert_eq!(
            newton_d(ann, gamma, [e(24), e(20)]),
            Err(Error::UnsafeBalance)
        );
    }

    #[test]
    fn g1k0_is_symmetric_around_one_plus_gamma() {
        let gamma = e(10);
        assert_eq!(g1k0(gamma, *WAD), Ok(gamma + U256::one()));
        assert_eq!(
            g1k0(gamma, *WAD + gamma + U256::from(5)),
            Ok(U256::from(6))
        );
        assert_eq!(
            g1k0(gamma, *WAD + gamma - U256::from(5)),
            Ok(U256::from(6))
        );
    }
}
