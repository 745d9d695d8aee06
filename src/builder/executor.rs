//! Build command execution.
//!
//! The executor runs planned commands strictly in order and remembers every
//! command that succeeded during the pass. A command equal to one already
//! performed, even for another project, is reported but not run again. The
//! first failure aborts the pass.

use anyhow::Result;

use crate::builder::command::BuildCommand;
use crate::core::Project;

/// Runs a single command. Implemented by the process runner and by fakes.
pub trait CommandRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &BuildCommand) -> Result<()> {
        (**self).run(command)
    }
}

/// Caller hooks invoked around each planned command.
pub trait BuildHooks {
    /// Called once per planned command before the dedup check. Only
    /// non-identity fields (extra args, env) can be edited.
    fn prepare_command(&mut self, _project: &Project, _command: &mut BuildCommand) {}

    /// Called once per planned command, whether it runs or not.
    fn observe_command(&mut self, _project: &Project, _command: &BuildCommand, _already_performed: bool) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl BuildHooks for NoHooks {}

/// Executes commands for a whole build pass.
pub struct CommandExecutor<R> {
    runner: R,
    performed: Vec<BuildCommand>,
    skipped: usize,
}

impl<R: CommandRunner> CommandExecutor<R> {
    pub fn new(runner: R) -> Self {
        CommandExecutor {
            runner,
            performed: Vec::new(),
            skipped: 0,
        }
    }

    /// Run the commands planned for `project`.
    pub fn execute(
        &mut self,
        project: &Project,
        commands: Vec<BuildCommand>,
        hooks: &mut dyn BuildHooks,
    ) -> Result<()> {
        for mut command in commands {
            hooks.prepare_command(project, &mut command);

            let already_performed = self.performed.contains(&command);
            hooks.observe_command(project, &command, already_performed);

            if already_performed {
                tracing::debug!("skipping already performed command: {}", command);
                self.skipped += 1;
                continue;
            }

            tracing::debug!("running: {}", command);
            self.runner.run(&command)?;
            self.performed.push(command);
        }

        Ok(())
    }

    /// Commands that ran successfully, in order.
    pub fn performed(&self) -> &[BuildCommand] {
        &self.performed
    }

    /// Number of commands skipped as duplicates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_runner(self) -> R {
        self.runner
    }
}
