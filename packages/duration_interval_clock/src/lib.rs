#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures how long a repeated operation takes and how often it is started.
//!
//! A [`DurationIntervalClock`] records two series of samples over a sliding window:
//!
//! * the **duration** of each measured execution, from start to end, and
//! * the **interval** between successive starts.
//!
//! Only the most recent samples are retained (10 by default), so the averages track the
//! recent behavior of the operation rather than its entire history. A fill-ratio check
//! tells callers whether enough samples have accumulated for the averages to be trusted.
//!
//! Measurements can be driven manually via [`start()`][DurationIntervalClock::start] and
//! [`end()`][DurationIntervalClock::end], scoped via [`span()`][DurationIntervalClock::span],
//! or by wrapping a unit of work with
//! [`measure_sync()`][DurationIntervalClock::measure_sync] or
//! [`measure_async()`][DurationIntervalClock::measure_async].
//!
//! # Manual measurement
//!
//! ```
//! use duration_interval_clock::DurationIntervalClock;
//!
//! // Average over the last 5 measurements.
//! let mut clock = DurationIntervalClock::with_sample_target_count(5_usize).unwrap();
//!
//! clock.start().unwrap();
//! // Perform some task.
//! clock.end().unwrap();
//!
//! // Time taken by the task.
//! let last = clock.last_duration();
//!
//! // After one measurement the average is equal to the last duration.
//! assert_eq!(clock.average_duration(), last);
//!
//! // Intervals require at least two starts.
//! assert_eq!(clock.last_interval(), None);
//! ```
//!
//! # Wrapping asynchronous work
//!
//! ```
//! use duration_interval_clock::DurationIntervalClock;
//!
//! # futures::executor::block_on(async {
//! let mut clock = DurationIntervalClock::new();
//!
//! for _ in 0..5 {
//!     let value = clock
//!         .measure_async(async || {
//!             // Some asynchronous task.
//!             "ret value"
//!         })
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(value, "ret value");
//! }
//!
//! assert_eq!(clock.duration_samples().len(), 5);
//! assert_eq!(clock.interval_samples().len(), 4);
//!
//! if clock.has_good_average() {
//!     println!("{clock}");
//! }
//! # });
//! ```
//!
//! # Concurrency
//!
//! A clock is a plain value mutated through `&mut self`. It measures one logical sequence of
//! start/end calls; measuring overlapping operations requires one clock per operation.
//!
//! # Logging
//!
//! Recorded samples are reported as `tracing` events at the `TRACE` level. Resets and restarts
//! that implicitly end a measurement are reported at the `DEBUG` level.

mod clock;
mod error;
mod pal;
mod sample_target_count;
mod span;
mod window;

pub use clock::*;
pub use error::*;
pub use sample_target_count::*;
pub use span::*;
pub use window::*;
