//! Curve parameters and their validation.

use {
    super::{
        constants::{MAX_A, MAX_GAMMA, MIN_A, MIN_GAMMA},
        error::Error,
        newton_d::newton_d,
        newton_y::newton_y,
    },
    anyhow::{Context, Result},
    number::serialization::HexOrDecimalU256,
    primitive_types::U256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
    std::path::Path,
};

/// Checks `ANN` and `gamma` against the bounds the solvers are safe for.
pub(crate) fn validate(ann: U256, gamma: U256) -> Result<(), Error> {
    if ann < *MIN_A || ann > *MAX_A {
        tracing::debug!(%ann, "unsafe value for A");
        return Err(Error::UnsafeA);
    }
    if gamma < *MIN_GAMMA || gamma > *MAX_GAMMA {
        tracing::debug!(%gamma, "unsafe value for gamma");
        return Err(Error::UnsafeGamma);
    }
    Ok(())
}

/// Amplification and convexity of a curve.
///
/// Values are validated whenever one is built, including deserialisation.
/// The solvers re-validate on every call regardless.
#[serde_as]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", try_from = "RawCurveParameters")]
pub struct CurveParameters {
    /// `A * N_COINS^N_COINS * A_MULTIPLIER`
    #[serde_as(as = "HexOrDecimalU256")]
    ann: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    gamma: U256,
}

/// Unvalidated wire form of [`CurveParameters`].
#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawCurveParameters {
    #[serde_as(as = "HexOrDecimalU256")]
    ann: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    gamma: U256,
}

impl TryFrom<RawCurveParameters> for CurveParameters {
    type Error = Error;

    fn try_from(raw: RawCurveParameters) -> Result<Self, Error> {
        Self::new(raw.ann, raw.gamma)
    }
}

impl CurveParameters {
    pub fn new(ann: U256, gamma: U256) -> Result<Self, Error> {
        validate(ann, gamma)?;
        Ok(Self { ann, gamma })
    }

    pub fn ann(&self) -> U256 {
        self.ann
    }

    pub fn gamma(&self) -> U256 {
        self.gamma
    }

    /// Parses parameters from a TOML document such as
    ///
    /// ```toml
    /// ann = "400000"
    /// gamma = "0x83e0717e1000"
    /// ```
    pub fn from_toml_str(config: &str) -> Result<Self> {
        let raw: RawCurveParameters =
            toml::from_str(config).context("invalid curve parameters")?;
        Self::try_from(raw).context("curve parameters out of bounds")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config).with_context(|| format!("failed to load {}", path.display()))
    }

    /// The invariant `D` for balances `x`.
    #[tracing::instrument(skip_all)]
    pub fn invariant(&self, x: [U256; 2]) -> Result<U256, Error> {
        newton_d(self.ann, self.gamma, x)
    }

    /// The balance `x[i]` keeping the invariant at `d` given `x[1 - i]`.
    #[tracing::instrument(skip(self, x, d))]
    pub fn balance(&self, x: [U256; 2], d: U256, i: usize) -> Result<U256, Error> {
        newton_y(self.ann, self.gamma, x, d, i)
    }
}
