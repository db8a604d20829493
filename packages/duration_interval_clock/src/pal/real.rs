use std::time::Instant;

use crate::pal::Platform;

/// The monotonic time source of the operating system, via the Rust standard library.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform;

pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = BuildTargetPlatform;

impl Platform for BuildTargetPlatform {
    #[cfg_attr(test, mutants::skip)] // Real time cannot be asserted exactly.
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
#[cfg(not(miri))] // Miri cannot talk to the real platform.
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn now_does_not_go_backwards() {
        let first = BUILD_TARGET_PLATFORM.now();
        let second = BUILD_TARGET_PLATFORM.now();

        assert!(second >= first);
    }
}
