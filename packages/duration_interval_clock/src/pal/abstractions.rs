use std::fmt::Debug;
use std::time::Instant;

/// Provides the current time for duration and interval measurement.
///
/// Implementations must never go backwards: each call returns a timestamp that is
/// equal to or later than the previous one.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    fn now(&self) -> Instant;
}
