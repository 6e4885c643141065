use {
    super::{
        arith::SafeU256,
        constants::WAD,
        error::{Error, Solver},
    },
    primitive_types::U256,
};

/// Fixed point square root, `floor(sqrt(x * 10**18))`.
///
/// Iteration stops as soon as the iterate stops decreasing, rather than
/// waiting for two equal iterates. The seed `(x + 10**18) / 2` is never below
/// the root, so this always lands on the floor and cannot oscillate between
/// the floor and the ceiling.
pub fn sqrt_int(x: U256) -> Result<U256, Error> {
    if x.is_zero() {
        return Ok(U256::zero());
    }
    let square = x.safe_mul(*WAD)?;

    // Never below the root, so the iterates decrease until they reach it.
    let mut y = x.safe_add(*WAD)? / U256::from(2);
    for iteration in 0..256 {
        let z = (square / y + y) / U256::from(2);
        if z >= y {
            tracing::trace!(iteration, %y, "sqrt_int converged");
            return Ok(y);
        }
        y = z;
    }

    tracing::debug!(%x, "sqrt_int did not converge");
    Err(Error::DidNotConverge(Solver::SqrtInt))
}
