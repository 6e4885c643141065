//! Curve constants. Every precondition of the solvers is expressed in terms
//! of these values, so they must not change.

use {primitive_types::U256, std::sync::LazyLock};

pub const N_COINS: usize = 2;

/// Hard iteration ceiling shared by all Newton loops.
pub const MAX_ITERATIONS: usize = 255;

pub static WAD: LazyLock<U256> = LazyLock::new(|| U256::exp10(18)); // 1e18

pub static A_MULTIPLIER: LazyLock<U256> = LazyLock::new(|| U256::from(10_000));

pub static MIN_GAMMA: LazyLock<U256> = LazyLock::new(|| U256::exp10(10));
pub static MAX_GAMMA: LazyLock<U256> = LazyLock::new(|| U256::from(2) * U256::exp10(16));

/// `N_COINS^N_COINS * A_MULTIPLIER / 10`
pub static MIN_A: LazyLock<U256> =
    LazyLock::new(|| n_coins_pow_n_coins() * *A_MULTIPLIER / U256::from(10));
/// `N_COINS^N_COINS * A_MULTIPLIER * 100_000`
pub static MAX_A: LazyLock<U256> =
    LazyLock::new(|| n_coins_pow_n_coins() * *A_MULTIPLIER * U256::from(100_000));

/// Series terms below this value no longer change a `halfpow` result.
pub static EXP_PRECISION: LazyLock<U256> = LazyLock::new(|| U256::exp10(10));

// Domain of balances and invariants the solvers are known to handle.
pub(crate) static MIN_X0: LazyLock<U256> = LazyLock::new(|| U256::exp10(9));
pub(crate) static MAX_X0: LazyLock<U256> = LazyLock::new(|| U256::exp10(15) * *WAD);
pub(crate) static MIN_X_RATIO: LazyLock<U256> = LazyLock::new(|| U256::exp10(14));
pub(crate) static MIN_D: LazyLock<U256> = LazyLock::new(|| U256::exp10(17));
pub(crate) static MAX_D: LazyLock<U256> = LazyLock::new(|| U256::exp10(15) * *WAD);
pub(crate) static MIN_FRAC: LazyLock<U256> = LazyLock::new(|| U256::exp10(16));
pub(crate) static MAX_FRAC: LazyLock<U256> = LazyLock::new(|| U256::exp10(20));

pub(crate) static E14: LazyLock<U256> = LazyLock::new(|| U256::exp10(14));
pub(crate) static E16: LazyLock<U256> = LazyLock::new(|| U256::exp10(16));

fn n_coins_pow_n_coins() -> U256 {
    U256::from(N_COINS).pow(U256::from(N_COINS))
}
