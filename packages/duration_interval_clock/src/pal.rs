//! Platform abstraction layer for the monotonic time source.
//!
//! This module allows switching between the real time source of the build target
//! and fake or mock implementations for testing purposes.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
#[cfg(test)]
pub(crate) use fake::*;
pub(crate) use real::*;
