//! Command runners.
//!
//! [`ProcessRunner`] spawns the real tools; [`DryRunRunner`] only records
//! what would have run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::command::{BuildCommand, Toolchain};
use crate::builder::executor::CommandRunner;
use crate::util::process::{find_executable, ProcessBuilder};

/// Default location of the IDE command line tool.
pub const DEFAULT_MDTOOL: &str = "/Applications/Xamarin Studio.app/Contents/MacOS/mdtool";

/// Default build engine executable.
pub const DEFAULT_XBUILD: &str = "xbuild";

/// Executables used for each toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub mdtool: PathBuf,
    pub xbuild: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        ToolPaths {
            mdtool: PathBuf::from(DEFAULT_MDTOOL),
            xbuild: PathBuf::from(DEFAULT_XBUILD),
        }
    }
}

impl ToolPaths {
    pub fn program(&self, toolchain: Toolchain) -> &Path {
        match toolchain {
            Toolchain::MdTool => &self.mdtool,
            Toolchain::XBuild => &self.xbuild,
        }
    }

    /// Program path with bare names looked up on PATH.
    pub fn resolve(&self, toolchain: Toolchain) -> PathBuf {
        let program = self.program(toolchain);
        if program.components().count() > 1 {
            return program.to_path_buf();
        }
        program
            .to_str()
            .and_then(find_executable)
            .unwrap_or_else(|| program.to_path_buf())
    }
}

/// Runs commands as child processes, streaming their output.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    tools: ToolPaths,
}

impl ProcessRunner {
    pub fn new(tools: ToolPaths) -> Self {
        ProcessRunner { tools }
    }

    /// The process that `command` runs as.
    pub fn process(&self, command: &BuildCommand) -> ProcessBuilder {
        let mut process =
            ProcessBuilder::new(self.tools.resolve(command.toolchain())).args(command.args());
        for (key, value) in command.env() {
            process = process.env(key, value);
        }
        if let Some(dir) = command.path().parent().filter(|d| !d.as_os_str().is_empty()) {
            process = process.cwd(dir);
        }
        process
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<()> {
        self.process(command).status_and_check()
    }
}

/// Records commands without running anything.
#[derive(Debug, Clone, Default)]
pub struct DryRunRunner {
    commands: Vec<BuildCommand>,
}

impl DryRunRunner {
    pub fn new() -> Self {
        DryRunRunner::default()
    }

    pub fn commands(&self) -> &[BuildCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<BuildCommand> {
        self.commands
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<()> {
        self.commands.push(command.clone());
        Ok(())
    }
}
