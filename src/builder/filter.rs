//! Project selection and configuration resolution.
//!
//! Selection happens in two stages: [`ProjectFilter::filtered_projects`]
//! applies the project type whitelist, and
//! [`ProjectFilter::buildable_projects`] narrows that down to projects that
//! can actually be built for a solution configuration. Exclusions in the
//! second stage are reported as warnings, never errors.

use std::fmt;

use crate::builder::util::solution_config_key;
use crate::core::{Project, ProjectConfig, ProjectType, Solution};

/// Why a project's configuration could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The project has no entry for the solution config key.
    Unmapped { project: String, solution_config: String },
    /// The mapped project config key has no settings.
    MissingProjectConfig { project: String, solution_config: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::Unmapped {
                project,
                solution_config,
            } => write!(
                f,
                "project ({}) does not have config for solution config ({}), skipping...",
                project, solution_config
            ),
            ConfigWarning::MissingProjectConfig {
                project,
                solution_config,
            } => write!(
                f,
                "project ({}) contains mapping for solution config ({}), but does not have project configuration, skipping...",
                project, solution_config
            ),
        }
    }
}

/// Resolve the project configuration for a solution config key.
pub fn resolve_config<'p>(
    project: &'p Project,
    solution_config: &str,
) -> Result<&'p ProjectConfig, ConfigWarning> {
    let key = project
        .config_map
        .get(solution_config)
        .ok_or_else(|| ConfigWarning::Unmapped {
            project: project.name.clone(),
            solution_config: solution_config.to_string(),
        })?;

    project
        .configs
        .get(key)
        .ok_or_else(|| ConfigWarning::MissingProjectConfig {
            project: project.name.clone(),
            solution_config: solution_config.to_string(),
        })
}

/// Whether `project_type` passes the whitelist.
///
/// An empty whitelist places no restriction on known project types.
pub fn is_project_type_allowed(project_type: ProjectType, whitelist: &[ProjectType]) -> bool {
    whitelist.is_empty() || whitelist.contains(&project_type)
}

/// Selects projects of a solution.
#[derive(Debug, Clone, Copy)]
pub struct ProjectFilter<'a> {
    solution: &'a Solution,
    whitelist: &'a [ProjectType],
}

impl<'a> ProjectFilter<'a> {
    pub fn new(solution: &'a Solution, whitelist: &'a [ProjectType]) -> Self {
        ProjectFilter {
            solution,
            whitelist,
        }
    }

    /// Whitelisted projects of a known type, in solution order.
    pub fn filtered_projects(&self) -> Vec<&'a Project> {
        self.solution
            .projects()
            .iter()
            .filter(|p| p.project_type != ProjectType::Unknown)
            .filter(|p| is_project_type_allowed(p.project_type, self.whitelist))
            .collect()
    }

    /// Filtered projects that can be built for `configuration|platform`,
    /// plus a warning for every project that was excluded.
    pub fn buildable_projects(
        &self,
        configuration: &str,
        platform: &str,
    ) -> (Vec<&'a Project>, Vec<String>) {
        let solution_config = solution_config_key(configuration, platform);
        let mut projects = Vec::new();
        let mut warnings = Vec::new();

        for project in self.filtered_projects() {
            if !project.config_map.contains_key(&solution_config) {
                let warning = ConfigWarning::Unmapped {
                    project: project.name.clone(),
                    solution_config: solution_config.clone(),
                };
                tracing::debug!("{}", warning);
                warnings.push(warning.to_string());
                continue;
            }

            let excluded = match project.project_type {
                ProjectType::Unknown => continue,
                ProjectType::Android if !project.android_application => Some(format!(
                    "project ({}) is not an android application project, skipping...",
                    project.name
                )),
                kind if kind.requires_executable() && !project.is_executable() => Some(format!(
                    "project ({}) is not archivable based on output type ({}), skipping...",
                    project.name, project.output_type
                )),
                _ => None,
            };
            if let Some(warning) = excluded {
                tracing::debug!("{}", warning);
                warnings.push(warning);
                continue;
            }

            projects.push(project);
        }

        (projects, warnings)
    }
}
