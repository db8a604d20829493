//! Bounded FIFO history of time samples.

use std::collections::VecDeque;
use std::collections::vec_deque;
use std::iter::Copied;
use std::time::Duration;

use crate::SampleTargetCount;

/// A sliding window over the most recent time samples of one series, oldest first.
///
/// The window never holds more samples than its capacity. Pushing a sample into a full
/// window evicts the oldest sample first, preserving the order of the remainder. Storage
/// grows up to the capacity and is reused from then on.
///
/// Clocks expose their windows as read-only views via
/// [`DurationIntervalClock::duration_samples()`][crate::DurationIntervalClock::duration_samples]
/// and [`DurationIntervalClock::interval_samples()`][crate::DurationIntervalClock::interval_samples].
///
/// # Examples
///
/// ```
/// use duration_interval_clock::DurationIntervalClock;
///
/// let mut clock = DurationIntervalClock::new();
/// clock.measure_sync(|| {}).unwrap();
///
/// let durations = clock.duration_samples();
/// assert_eq!(durations.len(), 1);
/// assert_eq!(durations.capacity().get(), 10);
/// assert_eq!(durations.last(), durations.mean());
/// ```
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: VecDeque<Duration>,
    capacity: SampleTargetCount,
}

impl SampleWindow {
    #[must_use]
    pub(crate) fn new(capacity: SampleTargetCount) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    /// Appends a sample, returning the evicted oldest sample if the window was full.
    pub(crate) fn push(&mut self, sample: Duration) -> Option<Duration> {
        let evicted = if self.is_full() {
            self.samples.pop_front()
        } else {
            None
        };

        self.samples.push_back(sample);
        evicted
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    /// The maximum number of samples retained by the window.
    #[must_use]
    pub fn capacity(&self) -> SampleTargetCount {
        self.capacity
    }

    /// The number of samples currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the next push will evict the oldest sample.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity.get()
    }

    /// The most recently pushed sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<Duration> {
        self.samples.back().copied()
    }

    /// The oldest retained sample, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<Duration> {
        self.samples.front().copied()
    }

    /// The arithmetic mean of the retained samples, or `None` if the window is empty.
    ///
    /// Samples that have been evicted do not contribute.
    ///
    /// # Panics
    ///
    /// Panics if the sum of the retained samples overflows [`Duration`], which is not
    /// a realistic scenario for measurements of elapsed time.
    #[must_use]
    pub fn mean(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }

        let total = self
            .samples
            .iter()
            .try_fold(Duration::ZERO, |total, sample| total.checked_add(*sample))
            .expect("sample sum overflows Duration - this indicates an unrealistic scenario");

        let count = u128::try_from(self.samples.len()).expect("usize always fits in u128");

        Some(Duration::from_nanos(
            total
                .as_nanos()
                .checked_div(count)
                .expect("guarded by emptiness check")
                .try_into()
                .expect("all realistic values fit in u64"),
        ))
    }

    /// Iterates over the retained samples, oldest first.
    pub fn iter(&self) -> Copied<vec_deque::Iter<'_, Duration>> {
        self.samples.iter().copied()
    }
}

impl<'a> IntoIterator for &'a SampleWindow {
    type Item = Duration;
    type IntoIter = Copied<vec_deque::Iter<'a, Duration>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
