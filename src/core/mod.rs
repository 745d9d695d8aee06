//! Core data structures for Xamarin Builder.

pub mod project;
pub mod project_type;
pub mod solution;

pub use project::{Project, ProjectConfig, OUTPUT_TYPE_EXE};
pub use project_type::{OutputType, ProjectType};
pub use solution::{Solution, SOLUTION_DESCRIPTION};
