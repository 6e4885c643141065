//! Lossless conversions between `U256` and the arbitrary precision integers
//! of the `num` crate.

use {
    anyhow::{Result, ensure},
    num::{BigInt, BigUint, bigint::Sign},
    primitive_types::U256,
};

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    let mut bytes = [0_u8; 32];
    input.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_big_endian(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

pub trait U256Ext: Sized {
    fn to_big_int(&self) -> BigInt;
    fn to_big_uint(&self) -> BigUint;
}

impl U256Ext for U256 {
    fn to_big_int(&self) -> BigInt {
        u256_to_big_int(self)
    }

    fn to_big_uint(&self) -> BigUint {
        u256_to_big_uint(self)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, num::One};

    #[test]
    fn u256_to_big_int_() {
        assert_eq!(u256_to_big_int(&U256::zero()), BigInt::from(0));
        assert_eq!(u256_to_big_int(&U256::one()), BigInt::from(1));
        assert_eq!(
            u256_to_big_int(&U256::MAX),
            (BigInt::one() << 256_u32) - BigInt::one()
        );
    }

    #[test]
    fn big_int_to_u256_() {
        assert_eq!(big_int_to_u256(&BigInt::from(0)).unwrap(), U256::zero());
        assert_eq!(
            big_int_to_u256(&BigInt::from(1_000_000_000_000_000_000_u64)).unwrap(),
            U256::exp10(18)
        );
        assert_eq!(
            big_int_to_u256(&((BigInt::one() << 256_u32) - 1)).unwrap(),
            U256::MAX
        );

        assert!(big_int_to_u256(&BigInt::from(-1)).is_err());
        assert!(big_int_to_u256(&(BigInt::one() << 256_u32)).is_err());
    }

    #[test]
    fn big_uint_round_trips_through_u256() {
        for value in [U256::zero(), U256::exp10(33), U256::MAX - U256::from(7)] {
            assert_eq!(big_uint_to_u256(&value.to_big_uint()).unwrap(), value);
            assert_eq!(big_int_to_u256(&value.to_big_int()).unwrap(), value);
        }
    }
}
