//! xamarin-builder - build orchestration for multi-project Xamarin solutions
//!
//! This crate selects the buildable projects of a solution, plans the
//! `mdtool`/`xbuild` invocations for each of them, runs them with
//! solution-wide deduplication, and locates the produced artifacts.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and fakes for unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildCommand, BuildError, SolutionBuilder};
pub use core::{Project, ProjectConfig, ProjectType, Solution};
