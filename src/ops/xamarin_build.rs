//! Implementation of `xamarin-build build`, `plan` and `outputs`.

use std::time::Instant;

use anyhow::Result;

use crate::builder::command::BuildCommand;
use crate::builder::events::BuildEvent;
use crate::builder::executor::{BuildHooks, CommandRunner};
use crate::builder::output::OutputMap;
use crate::builder::runner::{DryRunRunner, ProcessRunner, ToolPaths};
use crate::builder::solution_builder::{BuildFailure, BuildReport};
use crate::builder::SolutionBuilder;
use crate::core::Project;
use crate::util::shell::{format_duration, Shell, Status};

/// Options for the build and plan commands.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Requested configuration (e.g. "Release")
    pub configuration: String,

    /// Requested platform (e.g. "iPhone")
    pub platform: String,

    /// Extra arguments appended to every command
    pub extra_args: Vec<String>,
}

/// Hooks that add extra arguments and report each command to the shell.
struct ShellHooks<'a> {
    shell: &'a Shell,
    extra_args: &'a [String],
    dry_run: bool,
}

impl BuildHooks for ShellHooks<'_> {
    fn prepare_command(&mut self, _project: &Project, command: &mut BuildCommand) {
        command.push_args(self.extra_args.iter().cloned());
    }

    fn observe_command(&mut self, project: &Project, command: &BuildCommand, already_performed: bool) {
        self.shell
            .event(&BuildEvent::command(&project.name, command.to_string(), already_performed));

        if already_performed {
            self.shell
                .status(Status::Skipped, format!("{} (already performed)", command));
        } else if self.dry_run {
            self.shell.status(Status::Planned, &project.name);
            self.shell.print(command);
        } else {
            self.shell.set_spinner_message(format!("Building {}", project.name));
            self.shell.status(Status::Running, command);
        }
    }
}

fn report_warnings(shell: &Shell, warnings: &[String]) {
    for warning in warnings {
        shell.warn(warning);
        shell.event(&BuildEvent::warning(warning));
    }
}

fn run_pass<R: CommandRunner>(
    builder: &SolutionBuilder,
    shell: &Shell,
    opts: &BuildOptions,
    runner: R,
    dry_run: bool,
) -> Result<BuildReport> {
    let start = Instant::now();
    shell.event(&BuildEvent::started(&opts.configuration, &opts.platform));

    let mut hooks = ShellHooks {
        shell,
        extra_args: &opts.extra_args,
        dry_run,
    };

    if !dry_run {
        shell.start_spinner(format!("Building {}|{}", opts.configuration, opts.platform));
    }
    let result = builder.build_all_projects(&opts.configuration, &opts.platform, runner, &mut hooks);
    shell.finish_spinner();

    let elapsed = start.elapsed();
    match result {
        Ok(report) => {
            report_warnings(shell, &report.warnings);
            shell.event(&BuildEvent::BuildFinished {
                success: true,
                duration_ms: elapsed.as_millis() as u64,
                commands_run: Some(report.commands_run as u64),
            });
            if !dry_run {
                shell.status(
                    Status::Finished,
                    format!(
                        "{} command(s) run, {} skipped in {}",
                        report.commands_run,
                        report.commands_skipped,
                        format_duration(elapsed)
                    ),
                );
            }
            Ok(report)
        }
        Err(BuildFailure { warnings, error }) => {
            report_warnings(shell, &warnings);
            shell.event(&BuildEvent::finished(false, elapsed.as_millis() as u64));
            Err(error)
        }
    }
}

/// Build every buildable project with the real tools.
pub fn build(
    builder: &SolutionBuilder,
    shell: &Shell,
    tools: &ToolPaths,
    opts: &BuildOptions,
) -> Result<BuildReport> {
    shell.status(
        Status::Building,
        format!(
            "{} ({}|{})",
            builder.solution().path().display(),
            opts.configuration,
            opts.platform
        ),
    );

    run_pass(builder, shell, opts, ProcessRunner::new(tools.clone()), false)
}

/// Print the deduplicated commands a build would run, without running them.
pub fn plan(builder: &SolutionBuilder, shell: &Shell, opts: &BuildOptions) -> Result<Vec<BuildCommand>> {
    let mut runner = DryRunRunner::new();
    run_pass(builder, shell, opts, &mut runner, true)?;
    Ok(runner.into_commands())
}

/// Collect and report the outputs of a previous build.
pub fn outputs(
    builder: &SolutionBuilder,
    shell: &Shell,
    configuration: &str,
    platform: &str,
) -> Result<OutputMap> {
    let outputs = builder.collect_output(configuration, platform)?;

    for (project_type, found) in &outputs {
        for (kind, path) in found {
            shell.event(&BuildEvent::artifact(*project_type, *kind, path));
            shell.status(Status::Found, format!("{} {}", project_type, kind));
            shell.print(format!("{}\t{}\t{}", project_type, kind, path.display()));
        }
    }

    if outputs.is_empty() {
        tracing::info!("no build outputs found for {}|{}", configuration, platform);
    }

    Ok(outputs)
}
