//! Xamarin solution build orchestration.
//!
//! This module selects the projects of a solution, plans the external tool
//! invocations for each of them, runs those invocations and locates the
//! resulting build products.

pub mod clean;
pub mod command;
pub mod errors;
pub mod events;
pub mod executor;
pub mod filter;
pub mod output;
pub mod plan;
pub mod runner;
pub mod solution_builder;
pub mod util;

pub use clean::CleanupSweeper;
pub use command::{BuildCommand, BuildTarget, Toolchain};
pub use errors::BuildError;
pub use events::BuildEvent;
pub use executor::{BuildHooks, CommandExecutor, CommandRunner, NoHooks};
pub use filter::ProjectFilter;
pub use output::{OutputCollector, OutputMap};
pub use plan::{CommandPlanner, EngineToolchain, IdeToolchain, ToolchainStrategy};
pub use runner::{DryRunRunner, ProcessRunner, ToolPaths};
pub use solution_builder::{BuildFailure, BuildReport, SolutionBuilder};
