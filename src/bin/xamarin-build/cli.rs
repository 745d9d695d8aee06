//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use xamarin_builder::core::{ProjectType, SOLUTION_DESCRIPTION};
use xamarin_builder::ops::Overrides;
use xamarin_builder::util::shell::Shell;

/// xamarin-build - build orchestration for multi-project Xamarin solutions
#[derive(Parser)]
#[command(name = "xamarin-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the solution description
    #[arg(long, global = true, env = "XAMARIN_BUILD_SOLUTION", default_value = SOLUTION_DESCRIPTION)]
    pub solution: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn shell(&self) -> Shell {
        Shell::from_flags(
            self.quiet,
            self.verbose,
            self.message_format == MessageFormat::Json,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Status lines on stderr
    Human,
    /// One JSON event per line on stdout
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the selected projects of the solution
    Build(BuildArgs),

    /// Print the commands a build would run, without running them
    Plan(SelectArgs),

    /// Print the build products of a previous build
    Outputs(SelectArgs),

    /// Remove the bin and obj directories of the selected projects
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Project and configuration selection shared by several commands.
#[derive(Args, Clone)]
pub struct SelectArgs {
    /// Solution configuration (e.g. Release)
    #[arg(short, long)]
    pub configuration: Option<String>,

    /// Solution platform (e.g. iPhone)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Only build projects of this type (ios, tvos, macos, android)
    #[arg(long = "project-type")]
    pub project_types: Vec<ProjectType>,

    /// Build Apple projects with mdtool instead of xbuild
    #[arg(long)]
    pub force_mdtool: bool,

    /// Extra argument appended to every tool invocation
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

impl SelectArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            configuration: self.configuration.clone(),
            platform: self.platform.clone(),
            project_types: self.project_types.clone(),
            force_mdtool: self.force_mdtool,
        }
    }
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Skip collecting build products after the build
    #[arg(long)]
    pub no_outputs: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Only clean projects of this type (ios, tvos, macos, android)
    #[arg(long = "project-type")]
    pub project_types: Vec<ProjectType>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
