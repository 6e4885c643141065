use {
    primitive_types::U256,
    serde::{Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// (De)serialises a `U256` as a decimal string.
///
/// Deserialisation additionally accepts `0x` prefixed hex strings and plain
/// unsigned integers, so hand written configuration files can use whichever
/// representation is most readable for a given value.
pub struct HexOrDecimalU256;

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Visitor)
    }
}

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

struct Visitor;

impl de::Visitor<'_> for Visitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a u256 encoded as a hex or decimal string or an unsigned integer")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Some(hex) = s.strip_prefix("0x") {
            U256::from_str_radix(hex, 16)
                .map_err(|err| de::Error::custom(format!("failed to parse {s:?} as hex: {err:?}")))
        } else {
            U256::from_dec_str(s).map_err(|err| {
                de::Error::custom(format!("failed to parse {s:?} as decimal: {err:?}"))
            })
        }
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(U256::from(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(U256::from)
            .map_err(|_| de::Error::custom(format!("negative value {value}")))
    }
}
