use core::fmt;

/// A signed count of whole seconds since `1970-01-01T00:00:00Z`.
///
/// Positive for instants after the epoch, negative before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochSeconds(pub(crate) i64);

impl From<i64> for EpochSeconds {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<EpochSeconds> for i64 {
    fn from(value: EpochSeconds) -> Self {
        value.0
    }
}

impl EpochSeconds {
    /// The epoch itself.
    pub const UNIX_EPOCH: Self = Self(0);

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A signed count of nanoseconds since `1970-01-01T00:00:00Z`.
///
/// Every extended timestamp with an `i64` year fits in this range, so
/// conversions into it never fail on range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochNanoseconds(pub(crate) i128);

impl From<i128> for EpochNanoseconds {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl EpochNanoseconds {
    pub fn as_i128(&self) -> i128 {
        self.0
    }
}

impl fmt::Display for EpochNanoseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
