//! Errors raised by the curve math.

/// The iterative routine that exhausted its iteration budget.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Solver {
    GeometricMean,
    NewtonD,
    NewtonY,
    Halfpow,
    SqrtInt,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("arithmetic overflow or division by zero")]
    Overflow,
    #[error("unsafe value for A")]
    UnsafeA,
    #[error("unsafe value for gamma")]
    UnsafeGamma,
    #[error("unsafe value for x[0]")]
    UnsafeX0,
    #[error("unsafe ratio between balances")]
    UnsafeXRatio,
    #[error("unsafe value for D")]
    UnsafeD,
    #[error("coin index out of range")]
    InvalidIndex,
    #[error("unsafe balance relative to D")]
    UnsafeBalance,
    #[error("unsafe value for y")]
    UnsafeY,
    #[error("{0} did not converge")]
    DidNotConverge(Solver),
}

/// Coarse classification of [`Error`]s for callers that only need to know
/// why an operation was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Overflow,
    UnsafeParameter,
    UnsafeBalance,
    NonConvergence,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Overflow => ErrorKind::Overflow,
            Self::UnsafeA
            | Self::UnsafeGamma
            | Self::UnsafeX0
            | Self::UnsafeXRatio
            | Self::UnsafeD
            | Self::InvalidIndex => ErrorKind::UnsafeParameter,
            Self::UnsafeBalance | Self::UnsafeY => ErrorKind::UnsafeBalance,
            Self::DidNotConverge(_) => ErrorKind::NonConvergence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::Overflow.kind(), ErrorKind::Overflow);
        assert_eq!(Error::UnsafeGamma.kind(), ErrorKind::UnsafeParameter);
        assert_eq!(Error::InvalidIndex.kind(), ErrorKind::UnsafeParameter);
        assert_eq!(Error::UnsafeY.kind(), ErrorKind::UnsafeBalance);
        assert_eq!(
            Error::DidNotConverge(Solver::NewtonY).kind(),
            ErrorKind::NonConvergence
        );
    }

    #[test]
    fn messages_name_the_solver() {
        assert_eq!(
            Error::DidNotConverge(Solver::GeometricMean).to_string(),
            "geometric_mean did not converge"
        );
        assert_eq!(
            Error::DidNotConverge(Solver::NewtonD).to_string(),
            "newton_d did not converge"
        );
    }
}
