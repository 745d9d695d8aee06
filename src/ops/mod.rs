//! High-level operations.
//!
//! This module contains the implementation of the xamarin-build commands.

pub mod session;
pub mod xamarin_build;
pub mod xamarin_clean;

pub use session::{Overrides, Session};
pub use xamarin_build::{build, outputs, plan, BuildOptions};
pub use xamarin_clean::clean;
