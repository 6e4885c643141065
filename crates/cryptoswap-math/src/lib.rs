//! Fixed point math for two coin cryptoswap curves.
//!
//! All quantities are unsigned 256-bit integers scaled by `10**18`, except
//! `ANN` and `gamma` which are raw integers bounded by [`constants`]. Every
//! entry point validates its inputs on each call and either returns a fully
//! validated value or an [`Error`].

mod arith;
pub mod constants;
mod error;
mod full_math;
mod geometric_mean;
mod halfpow;
mod newton_d;
mod newton_y;
mod params;
mod sqrt;

pub use {
    error::{Error, ErrorKind, Solver},
    full_math::{mul_div, mul_div_rounding_up, mul_mod},
    geometric_mean::geometric_mean,
    halfpow::halfpow,
    newton_d::newton_d,
    newton_y::newton_y,
    params::CurveParameters,
    sqrt::sqrt_int,
};
