//! Checked `U256` arithmetic returning curve [`Error`]s.

use {super::error::Error, primitive_types::U256};

pub(crate) trait SafeU256: Sized {
    fn safe_add(self, other: Self) -> Result<Self, Error>;
    fn safe_sub(self, other: Self) -> Result<Self, Error>;
    fn safe_mul(self, other: Self) -> Result<Self, Error>;
    fn safe_div(self, other: Self) -> Result<Self, Error>;
}

impl SafeU256 for U256 {
    fn safe_add(self, other: Self) -> Result<Self, Error> {
        self.checked_add(other).ok_or(Error::Overflow)
    }

    fn safe_sub(self, other: Self) -> Result<Self, Error> {
        self.checked_sub(other).ok_or(Error::Overflow)
    }

    fn safe_mul(self, other: Self) -> Result<Self, Error> {
        self.checked_mul(other).ok_or(Error::Overflow)
    }

    fn safe_div(self, other: Self) -> Result<Self, Error> {
        self.checked_div(other).ok_or(Error::Overflow)
    }
}

/// Computes `a - b` as a magnitude and a flag telling whether the true
/// difference is negative.
pub(crate) fn signed_sub(a: U256, b: U256) -> (U256, bool) {
    if a >= b { (a - b, false) } else { (b - a, true) }
}
