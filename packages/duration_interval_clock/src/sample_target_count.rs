use std::fmt;
use std::num::NonZero;

use crate::{Error, Result};

/// The number of samples a [`DurationIntervalClock`][crate::DurationIntervalClock] retains
/// per series, and the denominator of its fill-ratio check.
///
/// A sample target count is always at least 1. Values from numeric sources are validated
/// via the `TryFrom` implementations, which reject zero, negative, NaN, infinite and
/// fractional inputs with [`Error::InvalidArgument`].
///
/// # Examples
///
/// ```
/// use duration_interval_clock::SampleTargetCount;
///
/// let count = SampleTargetCount::try_from(5_usize).unwrap();
/// assert_eq!(count.get(), 5);
///
/// assert!(SampleTargetCount::try_from(0_usize).is_err());
/// assert!(SampleTargetCount::try_from(-3_i64).is_err());
/// assert!(SampleTargetCount::try_from(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SampleTargetCount(NonZero<usize>);

impl SampleTargetCount {
    /// The sample target count used when none is specified.
    pub const DEFAULT: Self = Self(NonZero::new(10).expect("literal is non-zero"));

    /// Creates a sample target count from a value that is already known to be non-zero.
    #[must_use]
    pub const fn new(value: NonZero<usize>) -> Self {
        Self(value)
    }

    /// Returns the sample target count as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    fn invalid(value: impl fmt::Display, problem: &'static str) -> Error {
        Error::InvalidArgument {
            value: value.to_string(),
            problem,
        }
    }
}

impl Default for SampleTargetCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SampleTargetCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NonZero<usize>> for SampleTargetCount {
    fn from(value: NonZero<usize>) -> Self {
        Self(value)
    }
}

impl From<SampleTargetCount> for usize {
    fn from(value: SampleTargetCount) -> Self {
        value.get()
    }
}

impl TryFrom<usize> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        NonZero::new(value)
            .map(Self)
            .ok_or_else(|| Self::invalid(value, "must be at least 1"))
    }
}

impl TryFrom<u8> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::try_from(usize::from(value))
    }
}

impl TryFrom<u16> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Self::try_from(usize::from(value))
    }
}

impl TryFrom<u32> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::try_from(u64::from(value))
    }
}

impl TryFrom<u64> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        let value = usize::try_from(value)
            .map_err(|_| Self::invalid(value, "too large for this platform"))?;

        Self::try_from(value)
    }
}

impl TryFrom<i8> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i16> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: i16) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i32> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i64> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value < 1 {
            return Err(Self::invalid(value, "must be at least 1"));
        }

        let value = usize::try_from(value)
            .map_err(|_| Self::invalid(value, "too large for this platform"))?;

        Self::try_from(value)
    }
}

impl TryFrom<f32> for SampleTargetCount {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Self::try_from(f64::from(value))
    }
}

impl TryFrom<f64> for SampleTargetCount {
    type Error = Error;

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        reason = "value is checked to be a whole number within usize range before casting"
    )]
    fn try_from(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(Self::invalid(value, "must be a number"));
        }

        if value.is_infinite() {
            return Err(Self::invalid(value, "must be finite"));
        }

        if value < 1.0 {
            return Err(Self::invalid(value, "must be at least 1"));
        }

        if value.fract() != 0.0 {
            return Err(Self::invalid(value, "must be a whole number"));
        }

        // usize::MAX rounds up to 2^N as f64, which is itself out of range.
        if value >= usize::MAX as f64 {
            return Err(Self::invalid(value, "too large for this platform"));
        }

        Self::try_from(value as usize)
    }
}
