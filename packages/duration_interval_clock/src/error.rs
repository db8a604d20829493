use std::convert::Infallible;

use thiserror::Error;

/// Errors that can occur when configuring or driving a [`DurationIntervalClock`][crate::DurationIntervalClock].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller provided a value that cannot be used to configure a clock.
    #[error("invalid sample target count: '{value}' is invalid: {problem}")]
    InvalidArgument {
        /// The value that was rejected, formatted for display.
        value: String,

        /// A human-readable description of the problem.
        problem: &'static str,
    },

    /// The requested operation is not valid in the current state of the clock.
    ///
    /// The clock is left unchanged when this error is returned.
    #[error(transparent)]
    InvalidState(#[from] StateViolation),
}

/// Describes which start/end discipline rule an operation would have violated.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum StateViolation {
    /// `start()` was called while a measurement was already in progress.
    #[error("clock started before it was stopped")]
    AlreadyStarted,

    /// `end()` was called while no measurement was in progress.
    #[error("clock stopped before it was started")]
    NotStarted,

    /// `reset()` was called while a measurement was in progress.
    #[error("cannot reset clock while it is started")]
    ResetWhileStarted,
}

// Conversions that cannot fail, such as from `NonZero<usize>` to a sample target count.
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A specialized `Result` type for clock operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);
    assert_impl_all!(StateViolation: Send, Sync, Copy, Debug);

    #[test]
    fn invalid_argument_mentions_value_and_problem() {
        let error = Error::InvalidArgument {
            value: "-1".to_string(),
            problem: "must be at least 1",
        };

        let message = error.to_string();
        assert!(message.contains("-1"), "unexpected message: {message}");
        assert!(
            message.contains("must be at least 1"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn invalid_state_is_transparent() {
        let error = Error::from(StateViolation::AlreadyStarted);

        assert!(matches!(
            error,
            Error::InvalidState(StateViolation::AlreadyStarted)
        ));
        assert_eq!(error.to_string(), "clock started before it was stopped");
    }
}
