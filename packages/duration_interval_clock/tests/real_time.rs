//! Integration tests for `duration_interval_clock` against the real time source.
//!
//! Timing assertions use generous tolerances because the tests may run on
//! heavily loaded build machines.

use std::thread;
use std::time::{Duration, Instant};

use duration_interval_clock::{DurationIntervalClock, Error, StateViolation};

const SLEEP: Duration = Duration::from_millis(150);

/// Upper bound on how much later than requested a sleep may complete.
const SLACK: Duration = Duration::from_millis(100);

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn sample_counts_follow_sliding_window() {
    let mut clock = DurationIntervalClock::with_sample_target_count(5_usize).unwrap();

    for round in 0..2 {
        for i in 0..10_usize {
            assert_eq!(clock.duration_samples().len(), i.min(5), "round {round}");
            assert_eq!(
                clock.interval_samples().len(),
                i.saturating_sub(1).min(5),
                "round {round}"
            );

            clock.measure_sync(|| {}).unwrap();
        }

        clock.reset().unwrap();
    }
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn measure_sync_measures_blocking_sleep() {
    let mut clock = DurationIntervalClock::new();

    clock.measure_sync(|| thread::sleep(SLEEP)).unwrap();

    let duration = clock.last_duration().unwrap();
    assert!(duration >= SLEEP, "measured {duration:?}, slept {SLEEP:?}");
    assert!(
        duration < SLEEP + SLACK,
        "measured {duration:?}, slept {SLEEP:?}"
    );
}

#[tokio::test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
async fn sane_measurements() {
    let mut clock = DurationIntervalClock::new();
    let started = Instant::now();

    for _ in 0..10 {
        clock
            .measure_async(async || tokio::time::sleep(SLEEP).await)
            .await
            .unwrap();

        let duration = clock.last_duration().unwrap();
        assert!(duration >= SLEEP, "measured {duration:?}, slept {SLEEP:?}");
        assert!(
            duration < SLEEP + SLACK,
            "measured {duration:?}, slept {SLEEP:?}"
        );
    }

    let elapsed = started.elapsed();

    let average_duration = clock.average_duration().unwrap();
    assert!(average_duration >= SLEEP);
    assert!(
        average_duration < SLEEP + SLACK / 2,
        "average {average_duration:?} too far from {SLEEP:?}"
    );

    // Each interval spans the measurement it started plus the gap before the next start.
    let average_interval = clock.average_interval().unwrap();
    assert_eq!(clock.duration_samples().len(), 10);
    assert_eq!(clock.interval_samples().len(), 9);

    let pairs = clock
        .interval_samples()
        .iter()
        .zip(clock.duration_samples());

    for (interval, duration) in pairs {
        assert!(
            interval >= duration,
            "interval {interval:?} shorter than the measurement it contains {duration:?}"
        );
    }

    assert!(
        average_interval <= elapsed / 9,
        "average interval {average_interval:?} exceeds total {elapsed:?} over 9 intervals"
    );
}

#[tokio::test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
async fn measure_async_error_propagates_after_end() {
    let mut clock = DurationIntervalClock::new();

    let result = clock
        .measure_async(async || {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err::<(), _>("operation failed")
        })
        .await
        .unwrap();

    assert_eq!(result, Err("operation failed"));
    assert!(!clock.is_started());
    assert_eq!(clock.duration_samples().len(), 1);
}

#[tokio::test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
async fn cancelled_measurement_records_partial_duration() {
    let timeout = Duration::from_millis(50);
    let mut clock = DurationIntervalClock::new();

    let result = tokio::time::timeout(
        timeout,
        clock.measure_async(async || tokio::time::sleep(Duration::from_secs(10)).await),
    )
    .await;

    assert!(result.is_err(), "operation should have timed out");
    assert!(!clock.is_started());

    let duration = clock.last_duration().unwrap();
    assert!(duration >= timeout, "measured {duration:?}");
    assert!(duration < Duration::from_secs(5), "measured {duration:?}");
}

#[tokio::test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
async fn measure_async_on_started_clock_fails() {
    let mut clock = DurationIntervalClock::new();
    clock.start().unwrap();

    let mut called = false;
    let result = clock
        .measure_async(async || {
            called = true;
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::InvalidState(StateViolation::AlreadyStarted))
    ));
    assert!(!called);
    assert!(clock.is_started());
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn intervals_include_time_between_measurements() {
    let mut clock = DurationIntervalClock::new();

    clock.measure_sync(|| {}).unwrap();
    thread::sleep(SLEEP);
    clock.measure_sync(|| {}).unwrap();

    let interval = clock.last_interval().unwrap();
    assert!(interval >= SLEEP, "measured {interval:?}");
    assert!(clock.last_duration().unwrap() < interval);
}
