use {
    super::{
        arith::{SafeU256, signed_sub},
        constants::{MAX_ITERATIONS, N_COINS, WAD},
        error::{Error, Solver},
        full_math::mul_div,
    },
    primitive_types::U256,
};

/// Geometric mean `sqrt(x[0] * x[1])` of two fixed point values, computed by
/// Newton iteration starting from the larger value.
///
/// `sort` orders the inputs descending first; the mean itself does not depend
/// on the order, but starting from the larger value converges from above.
pub fn geometric_mean(unsorted_x: [U256; 2], sort: bool) -> Result<U256, Error> {
    let x = if sort && unsorted_x[0] < unsorted_x[1] {
        [unsorted_x[1], unsorted_x[0]]
    } else {
        unsorted_x
    };
    if x[0].is_zero() {
        return Err(Error::Overflow);
    }

    let mut d = x[0];
    for iteration in 0..MAX_ITERATIONS {
        let d_prev = d;
        d = d
            .safe_add(mul_div(x[0], x[1], d)?)?
            .safe_div(U256::from(N_COINS))?;

        let (diff, _) = signed_sub(d, d_prev);
        if diff <= U256::one() || diff.safe_mul(*WAD)? < d {
            tracing::trace!(iteration, %d, "geometric mean converged");
            return Ok(d);
        }
    }

    tracing::debug!(x0 = %x[0], x1 = %x[1], "geometric mean did not converge");
    Err(Error::DidNotConverge(Solver::GeometricMean))
}
