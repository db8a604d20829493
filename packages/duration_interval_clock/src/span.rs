//! Scoped measurements that end when dropped.

use std::time::Duration;

use crate::DurationIntervalClock;

/// A measurement in progress on a [`DurationIntervalClock`], ended when the span is dropped.
///
/// Created by [`DurationIntervalClock::span()`], which starts the clock. The span holds
/// exclusive access to the clock until it ends, so exactly one duration sample is recorded
/// per span regardless of how the enclosing scope is left: normal completion, early return,
/// panic unwinding or the cancellation of an enclosing future.
///
/// # Examples
///
/// ```
/// use duration_interval_clock::DurationIntervalClock;
///
/// let mut clock = DurationIntervalClock::new();
///
/// {
///     let _span = clock.span().unwrap();
///     // Perform the operation being measured.
/// } // The duration is recorded here.
///
/// assert!(!clock.is_started());
/// assert!(clock.last_duration().is_some());
/// ```
///
/// The recorded duration is also available by ending the span explicitly:
///
/// ```
/// use duration_interval_clock::DurationIntervalClock;
///
/// let mut clock = DurationIntervalClock::new();
///
/// let span = clock.span().unwrap();
/// let duration = span.end();
///
/// assert_eq!(clock.last_duration(), Some(duration));
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct ClockSpan<'a> {
    clock: &'a mut DurationIntervalClock,
}

impl<'a> ClockSpan<'a> {
    /// Wraps a clock that the caller has just started.
    pub(crate) fn new(clock: &'a mut DurationIntervalClock) -> Self {
        debug_assert!(clock.is_started(), "span created for a clock that is not started");

        Self { clock }
    }

    /// Ends the measurement now and returns the recorded duration sample.
    pub fn end(self) -> Duration {
        self.clock
            .end_if_started()
            .expect("a span has exclusive access to a started clock until it ends")
    }
}

impl Drop for ClockSpan<'_> {
    fn drop(&mut self) {
        // No effect if the span has already been ended explicitly.
        self.clock.end_if_started();
    }
}
