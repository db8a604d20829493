//! Example code for the package documentation.
//!
//! Measures a simulated task whose duration grows on every iteration
//! and reports the sliding-window statistics every fifth iteration.
//!
//! Run with: `cargo run --example duration_interval_clock_readme`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::thread;
use std::time::Duration;

use duration_interval_clock::DurationIntervalClock;

fn main() {
    // Average over the last 5 measurements.
    let mut clock = DurationIntervalClock::with_sample_target_count(5_usize).unwrap();

    for i in 0..=20_u64 {
        let value = clock
            .measure_sync(|| {
                // Some task that gets slower over time.
                thread::sleep(Duration::from_millis(10 + i));
                "ret value"
            })
            .unwrap();

        assert_eq!(value, "ret value");

        if i % 5 == 0 {
            println!();
            println!("Iteration {i}");
            println!("  last duration:    {:?}", clock.last_duration());
            println!("  average duration: {:?}", clock.average_duration());
            println!("  last interval:    {:?}", clock.last_interval());
            println!("  average interval: {:?}", clock.average_interval());
            println!("  good average:     {}", clock.has_good_average());
        }
    }

    println!();
    println!("{clock}");
}
