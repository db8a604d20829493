use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::{ClockSpan, Error, Result, SampleTargetCount, SampleWindow, StateViolation};

/// The fill ratio used by [`DurationIntervalClock::has_good_average()`].
pub const DEFAULT_QUORUM: f64 = 0.5;

/// Measures how long a repeated operation takes and how often it is started.
///
/// The clock records two series of samples over a sliding window:
///
/// * **durations** - the time between each `start` and its matching `end`.
/// * **intervals** - the time between consecutive `start` calls, regardless of any `end`
///   calls in between. There is no interval before the second start.
///
/// Each series retains at most [`sample_target_count()`][Self::sample_target_count] samples,
/// evicting the oldest first. Averages are computed over exactly the retained samples.
///
/// The clock is either idle or started. Operations that do not make sense in the current
/// state fail with [`Error::InvalidState`] and leave the clock unchanged.
///
/// One clock measures one logical sequence of operations. Overlapping measurements from
/// independent tasks need separate clocks.
///
/// # Examples
///
/// ```
/// use duration_interval_clock::DurationIntervalClock;
///
/// // Average over the last 5 measurements.
/// let mut clock = DurationIntervalClock::with_sample_target_count(5_usize).unwrap();
///
/// clock.start().unwrap();
/// // Perform some task.
/// clock.end().unwrap();
///
/// // After one measurement the average equals the last duration.
/// assert_eq!(clock.average_duration(), clock.last_duration());
///
/// // Intervals need at least two starts.
/// assert_eq!(clock.last_interval(), None);
/// assert_eq!(clock.average_interval(), None);
/// ```
#[derive(Debug)]
pub struct DurationIntervalClock {
    durations: SampleWindow,
    intervals: SampleWindow,
    state: State,
    platform: PlatformFacade,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle {
        // Retained after `end()` so the next start can record an interval.
        last_start: Option<Instant>,
    },
    Started {
        started_at: Instant,
    },
}

impl DurationIntervalClock {
    /// Creates a clock that retains the default number of samples per series.
    ///
    /// The default is [`SampleTargetCount::DEFAULT`] (10 samples).
    #[must_use]
    pub fn new() -> Self {
        Self::from(SampleTargetCount::DEFAULT)
    }

    /// Creates a clock that retains up to `sample_target_count` samples per series.
    ///
    /// Accepts any value that converts into a [`SampleTargetCount`]: the primitive integer
    /// types up to 64 bits, `f32`, `f64`, `NonZero<usize>` and `SampleTargetCount` itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the value is zero, negative, NaN, infinite or
    /// otherwise not a usable sample count.
    ///
    /// # Examples
    ///
    /// ```
    /// use duration_interval_clock::{DurationIntervalClock, Error};
    ///
    /// let clock = DurationIntervalClock::with_sample_target_count(100_usize).unwrap();
    /// assert_eq!(clock.sample_target_count().get(), 100);
    ///
    /// let result = DurationIntervalClock::with_sample_target_count(-1_i64);
    /// assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    /// ```
    pub fn with_sample_target_count<C>(sample_target_count: C) -> Result<Self>
    where
        C: TryInto<SampleTargetCount>,
        Error: From<C::Error>,
    {
        Ok(Self::from(sample_target_count.try_into()?))
    }

    #[must_use]
    pub(crate) fn with_platform(
        sample_target_count: SampleTargetCount,
        platform: PlatformFacade,
    ) -> Self {
        Self {
            durations: SampleWindow::new(sample_target_count),
            intervals: SampleWindow::new(sample_target_count),
            state: State::Idle { last_start: None },
            platform,
        }
    }

    /// Starts a measurement.
    ///
    /// If the clock has been started before, the time since the previous start is recorded
    /// as an interval sample.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::AlreadyStarted`] if a measurement is already in progress.
    /// Use [`restart()`][Self::restart] to end it implicitly instead.
    pub fn start(&mut self) -> Result<()> {
        let State::Idle { last_start } = self.state else {
            return Err(StateViolation::AlreadyStarted.into());
        };

        self.begin(last_start);
        Ok(())
    }

    /// Starts a measurement, first ending the one in progress if there is one.
    ///
    /// Restarting a started clock records both a duration sample for the measurement it
    /// ends and an interval sample for the new start. Returns the implicitly recorded
    /// duration, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use duration_interval_clock::DurationIntervalClock;
    ///
    /// let mut clock = DurationIntervalClock::new();
    ///
    /// assert_eq!(clock.restart(), None);
    /// assert!(clock.restart().is_some());
    /// clock.end().unwrap();
    ///
    /// assert_eq!(clock.duration_samples().len(), 2);
    /// assert_eq!(clock.interval_samples().len(), 1);
    /// ```
    pub fn restart(&mut self) -> Option<Duration> {
        let (ended, last_start) = match self.state {
            State::Idle { last_start } => (None, last_start),
            State::Started { started_at } => {
                let duration = self.finish(started_at);
                debug!(?duration, "restart ended the measurement in progress");

                (Some(duration), Some(started_at))
            }
        };

        self.begin(last_start);
        ended
    }

    /// Ends the measurement in progress and returns the recorded duration sample.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::NotStarted`] if no measurement is in progress.
    /// Use [`end_if_started()`][Self::end_if_started] to ignore this case instead.
    pub fn end(&mut self) -> Result<Duration> {
        let State::Started { started_at } = self.state else {
            return Err(StateViolation::NotStarted.into());
        };

        Ok(self.finish(started_at))
    }

    /// Ends the measurement in progress, if there is one.
    ///
    /// Returns the recorded duration sample, or `None` without any effect if the clock
    /// is not started.
    pub fn end_if_started(&mut self) -> Option<Duration> {
        let State::Started { started_at } = self.state else {
            return None;
        };

        Some(self.finish(started_at))
    }

    /// Clears all samples and forgets the last start, as if the clock were newly created.
    ///
    /// The sample target count is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::ResetWhileStarted`] if a measurement is in progress.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_started() {
            return Err(StateViolation::ResetWhileStarted.into());
        }

        self.durations.clear();
        self.intervals.clear();
        self.state = State::Idle { last_start: None };

        debug!(
            sample_target_count = self.sample_target_count().get(),
            "clock reset"
        );

        Ok(())
    }

    /// Starts a measurement that ends when the returned span is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::AlreadyStarted`] if a measurement is already in progress.
    pub fn span(&mut self) -> Result<ClockSpan<'_>> {
        self.start()?;
        Ok(ClockSpan::new(self))
    }

    /// Measures the duration of a synchronous operation and returns its result.
    ///
    /// The measurement ends after `f` returns, or while unwinding if `f` panics.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::AlreadyStarted`] without calling `f` if a measurement is
    /// already in progress. Errors produced by `f` are returned unchanged inside `Ok`.
    ///
    /// # Examples
    ///
    /// ```
    /// use duration_interval_clock::DurationIntervalClock;
    ///
    /// let mut clock = DurationIntervalClock::new();
    ///
    /// let sum = clock.measure_sync(|| (1..=100).sum::<u32>()).unwrap();
    ///
    /// assert_eq!(sum, 5050);
    /// assert_eq!(clock.duration_samples().len(), 1);
    /// ```
    pub fn measure_sync<R>(&mut self, f: impl FnOnce() -> R) -> Result<R> {
        let _span = self.span()?;
        Ok(f())
    }

    /// Measures the duration of an asynchronous operation and returns its result.
    ///
    /// The measurement ends after the operation completes. If the returned future is dropped
    /// before completion (e.g. by a timeout), the measurement ends at that point and the
    /// partial duration is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StateViolation::AlreadyStarted`] without calling `f` if a measurement is
    /// already in progress. Errors produced by `f` are returned unchanged inside `Ok`.
    ///
    /// # Examples
    ///
    /// ```
    /// use duration_interval_clock::DurationIntervalClock;
    ///
    /// let mut clock = DurationIntervalClock::new();
    ///
    /// let value = futures::executor::block_on(clock.measure_async(async || "ret value")).unwrap();
    ///
    /// assert_eq!(value, "ret value");
    /// assert!(!clock.is_started());
    /// ```
    pub async fn measure_async<R>(&mut self, f: impl AsyncFnOnce() -> R) -> Result<R> {
        let _span = self.span()?;
        Ok(f().await)
    }

    /// Whether enough interval samples have been collected to trust the averages.
    ///
    /// Returns `true` if the number of retained interval samples is at least `quorum` times
    /// the sample target count, rounded and clamped to `1..=sample_target_count`. A NaN
    /// quorum is never satisfied. Duration samples are not considered.
    ///
    /// # Examples
    ///
    /// ```
    /// use duration_interval_clock::DurationIntervalClock;
    ///
    /// let mut clock = DurationIntervalClock::with_sample_target_count(5_usize).unwrap();
    ///
    /// for _ in 0..3 {
    ///     clock.measure_sync(|| {}).unwrap();
    /// }
    ///
    /// // Three starts produce two intervals.
    /// assert!(clock.check_has_good_average(0.4));
    /// assert!(!clock.check_has_good_average(0.6));
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        reason = "the required count is clamped to 1..=sample_target_count before casting back"
    )]
    pub fn check_has_good_average(&self, quorum: f64) -> bool {
        if quorum.is_nan() {
            return false;
        }

        let target = self.sample_target_count().get() as f64;
        let required = (quorum * target).round().clamp(1.0, target) as usize;

        self.intervals.len() >= required
    }

    /// Whether at least half of the interval sample window has been filled.
    ///
    /// Equivalent to [`check_has_good_average(DEFAULT_QUORUM)`][Self::check_has_good_average].
    #[must_use]
    pub fn has_good_average(&self) -> bool {
        self.check_has_good_average(DEFAULT_QUORUM)
    }

    /// The maximum number of samples retained per series.
    #[must_use]
    pub fn sample_target_count(&self) -> SampleTargetCount {
        self.durations.capacity()
    }

    /// Whether a measurement is in progress.
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Started { .. })
    }

    /// The most recent duration sample, if any.
    #[must_use]
    pub fn last_duration(&self) -> Option<Duration> {
        self.durations.last()
    }

    /// The most recent interval sample, if any.
    #[must_use]
    pub fn last_interval(&self) -> Option<Duration> {
        self.intervals.last()
    }

    /// The mean of the retained duration samples, if any.
    #[must_use]
    pub fn average_duration(&self) -> Option<Duration> {
        self.durations.mean()
    }

    /// The mean of the retained interval samples, if any.
    #[must_use]
    pub fn average_interval(&self) -> Option<Duration> {
        self.intervals.mean()
    }

    /// The retained duration samples.
    #[must_use]
    pub fn duration_samples(&self) -> &SampleWindow {
        &self.durations
    }

    /// The retained interval samples.
    #[must_use]
    pub fn interval_samples(&self) -> &SampleWindow {
        &self.intervals
    }

    fn begin(&mut self, last_start: Option<Instant>) {
        let now = self.platform.now();

        if let Some(last_start) = last_start {
            let interval = now.saturating_duration_since(last_start);
            let evicted = self.intervals.push(interval);

            trace!(
                ?interval,
                ?evicted,
                retained = self.intervals.len(),
                "recorded interval sample"
            );
        }

        self.state = State::Started { started_at: now };
    }

    fn finish(&mut self, started_at: Instant) -> Duration {
        let duration = self.platform.now().saturating_duration_since(started_at);
        let evicted = self.durations.push(duration);
        self.state = State::Idle {
            last_start: Some(started_at),
        };

        trace!(
            ?duration,
            ?evicted,
            retained = self.durations.len(),
            "recorded duration sample"
        );

        duration
    }
}

impl Default for DurationIntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SampleTargetCount> for DurationIntervalClock {
    fn from(sample_target_count: SampleTargetCount) -> Self {
        Self::with_platform(sample_target_count, PlatformFacade::real())
    }
}

impl fmt::Display for DurationIntervalClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_mean(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            window: &SampleWindow,
        ) -> fmt::Result {
            match window.mean() {
                Some(mean) => write!(
                    f,
                    "{name} {mean:?} (mean of {}/{})",
                    window.len(),
                    window.capacity()
                ),
                None => write!(f, "{name} n/a"),
            }
        }

        write_mean(f, "duration", &self.durations)?;
        f.write_str(", ")?;
        write_mean(f, "interval", &self.intervals)
    }
}
