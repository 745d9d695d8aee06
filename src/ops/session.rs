//! Loading a solution description together with its configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::runner::ToolPaths;
use crate::builder::SolutionBuilder;
use crate::core::{ProjectType, Solution};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Settings given on the command line. Unset values fall back to config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub configuration: Option<String>,
    pub platform: Option<String>,
    pub project_types: Vec<ProjectType>,
    pub force_mdtool: bool,
}

/// A loaded solution with command line settings merged over config.
#[derive(Debug)]
pub struct Session {
    builder: SolutionBuilder,
    tools: ToolPaths,
    configuration: Option<String>,
    platform: Option<String>,
}

impl Session {
    /// Load `description` and the global and project configuration files.
    pub fn open(description: &Path, overrides: Overrides) -> Result<Self> {
        let root = description
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&root));

        Self::with_config(Solution::load(description)?, &config, overrides)
    }

    /// Build a session from an already loaded solution and config.
    pub fn with_config(solution: Solution, config: &Config, overrides: Overrides) -> Result<Self> {
        // CLI > config > defaults
        let project_types = if overrides.project_types.is_empty() {
            config.project_types()
        } else {
            overrides.project_types
        };
        let force_mdtool = overrides.force_mdtool || config.build.force_mdtool.unwrap_or(false);

        let mut builder = SolutionBuilder::new(solution, project_types, force_mdtool)?;
        if let Some(dir) = &config.output.archives_dir {
            builder = builder.with_archives_dir(dir);
        }

        Ok(Session {
            builder,
            tools: config.tool_paths(),
            configuration: overrides.configuration.or_else(|| config.build.configuration.clone()),
            platform: overrides.platform.or_else(|| config.build.platform.clone()),
        })
    }

    pub fn builder(&self) -> &SolutionBuilder {
        &self.builder
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// The requested `(configuration, platform)`.
    pub fn selection(&self) -> Result<(&str, &str)> {
        let Some(configuration) = self.configuration.as_deref() else {
            bail!(
                "no configuration given\n\
                 hint: pass --configuration or set `build.configuration` in .xamarin-build/config.toml"
            );
        };
        let Some(platform) = self.platform.as_deref() else {
            bail!(
                "no platform given\n\
                 hint: pass --platform or set `build.platform` in .xamarin-build/config.toml"
            );
        };
        Ok((configuration, platform))
    }
}
