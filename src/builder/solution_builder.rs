//! Solution-wide build orchestration.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::builder::clean::CleanupSweeper;
use crate::builder::errors::BuildError;
use crate::builder::executor::{BuildHooks, CommandExecutor, CommandRunner};
use crate::builder::filter::{resolve_config, ProjectFilter};
use crate::builder::output::{default_archives_dir, OutputCollector, OutputMap};
use crate::builder::plan::CommandPlanner;
use crate::builder::util::solution_config_key;
use crate::core::{Project, ProjectType, Solution};

/// Outcome of a successful build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Projects skipped during selection, in order
    pub warnings: Vec<String>,
    /// Commands that ran
    pub commands_run: usize,
    /// Commands skipped because an equal command already ran
    pub commands_skipped: usize,
}

/// A failed build pass, with the warnings gathered before the failure.
#[derive(Debug, Error)]
#[error("{error:#}")]
pub struct BuildFailure {
    pub warnings: Vec<String>,
    pub error: anyhow::Error,
}

impl BuildFailure {
    fn new(warnings: Vec<String>, error: impl Into<anyhow::Error>) -> Self {
        BuildFailure {
            warnings,
            error: error.into(),
        }
    }
}

/// Builds, collects and cleans the projects of a solution.
#[derive(Debug, Clone)]
pub struct SolutionBuilder {
    solution: Solution,
    project_types: Vec<ProjectType>,
    force_mdtool: bool,
    archives_dir: Option<PathBuf>,
}

/// Check that `path` is an existing `.sln` file.
pub fn validate_solution_path(path: &Path) -> Result<(), BuildError> {
    if !path.is_file() {
        return Err(BuildError::SolutionNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_sln = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("sln"))
        .unwrap_or(false);
    if !is_sln {
        return Err(BuildError::InvalidSolutionPath {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

impl SolutionBuilder {
    /// Create a builder for `solution`.
    ///
    /// `project_types` restricts which project types are considered; an
    /// empty list allows every known type.
    pub fn new(solution: Solution, project_types: Vec<ProjectType>, force_mdtool: bool) -> Result<Self> {
        validate_solution_path(solution.path())?;

        Ok(SolutionBuilder {
            solution,
            project_types,
            force_mdtool,
            archives_dir: default_archives_dir(),
        })
    }

    /// Override where Xcode archives are searched.
    pub fn with_archives_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archives_dir = Some(dir.into());
        self
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn force_mdtool(&self) -> bool {
        self.force_mdtool
    }

    pub fn filter(&self) -> ProjectFilter<'_> {
        ProjectFilter::new(&self.solution, &self.project_types)
    }

    pub fn filtered_projects(&self) -> Vec<&Project> {
        self.filter().filtered_projects()
    }

    pub fn buildable_projects(&self, configuration: &str, platform: &str) -> (Vec<&Project>, Vec<String>) {
        self.filter().buildable_projects(configuration, platform)
    }

    /// Plan and run every buildable project for `configuration|platform`.
    ///
    /// Commands run in project order; an equal command is run at most once
    /// per pass. The first failing command stops the pass.
    pub fn build_all_projects<R: CommandRunner>(
        &self,
        configuration: &str,
        platform: &str,
        runner: R,
        hooks: &mut dyn BuildHooks,
    ) -> Result<BuildReport, BuildFailure> {
        let solution_config = solution_config_key(configuration, platform);
        if !self.solution.has_configuration(&solution_config) {
            return Err(BuildFailure::new(
                Vec::new(),
                BuildError::MissingSolutionConfig {
                    config: solution_config,
                    solution: self.solution.path().to_path_buf(),
                },
            ));
        }

        let (projects, mut warnings) = self.buildable_projects(configuration, platform);
        if projects.is_empty() {
            tracing::info!("no buildable projects for {}", solution_config);
            return Ok(BuildReport {
                warnings,
                ..Default::default()
            });
        }

        let planner = CommandPlanner::new(
            self.solution.path(),
            configuration,
            platform,
            self.force_mdtool,
        );
        let mut executor = CommandExecutor::new(runner);

        for project in projects {
            let config = match resolve_config(project, &solution_config) {
                Ok(config) => config,
                Err(warning) => {
                    tracing::debug!("{}", warning);
                    warnings.push(warning.to_string());
                    continue;
                }
            };

            let commands = planner.plan(project, config);
            if let Err(error) = executor.execute(project, commands, hooks) {
                return Err(BuildFailure::new(warnings, error));
            }
        }

        Ok(BuildReport {
            warnings,
            commands_run: executor.performed().len(),
            commands_skipped: executor.skipped(),
        })
    }

    /// Find the products of a `configuration|platform` build.
    pub fn collect_output(&self, configuration: &str, platform: &str) -> Result<OutputMap> {
        OutputCollector::new(self.filter(), self.archives_dir.clone(), self.force_mdtool)
            .collect(configuration, platform)
    }

    /// Remove the `bin` and `obj` directories of every filtered project.
    pub fn clean_all<F>(&self, observe: F) -> Result<()>
    where
        F: FnMut(&Project, &Path),
    {
        CleanupSweeper::new(self.filter()).clean_all(observe)
    }
}
