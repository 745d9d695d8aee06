//! Configuration file support for xamarin-build.
//!
//! Two configuration file locations are read:
//! - Global: `~/.xamarin-build/config.toml` - User-wide defaults
//! - Project: `.xamarin-build/config.toml` next to the solution description
//!
//! Project config takes precedence over global config. Command line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::runner::ToolPaths;
use crate::core::ProjectType;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".xamarin-build";

/// xamarin-build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Tool locations
    pub tools: ToolsConfig,

    /// Output discovery settings
    pub output: OutputConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Default configuration (e.g. "Release")
    pub configuration: Option<String>,

    /// Default platform (e.g. "iPhone")
    pub platform: Option<String>,

    /// Project types to build when none are given on the command line
    pub project_types: Vec<String>,

    /// Build Apple projects with mdtool instead of xbuild
    pub force_mdtool: Option<bool>,
}

/// Locations of the external build tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub mdtool: Option<PathBuf>,
    pub xbuild: Option<PathBuf>,
}

/// Output discovery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Where Xcode archives are searched (default: ~/Library/Developer/Xcode/Archives)
    pub archives_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Build settings
        if other.build.configuration.is_some() {
            self.build.configuration = other.build.configuration;
        }
        if other.build.platform.is_some() {
            self.build.platform = other.build.platform;
        }
        if !other.build.project_types.is_empty() {
            self.build.project_types = other.build.project_types;
        }
        if other.build.force_mdtool.is_some() {
            self.build.force_mdtool = other.build.force_mdtool;
        }

        // Tools
        if other.tools.mdtool.is_some() {
            self.tools.mdtool = other.tools.mdtool;
        }
        if other.tools.xbuild.is_some() {
            self.tools.xbuild = other.tools.xbuild;
        }

        // Output
        if other.output.archives_dir.is_some() {
            self.output.archives_dir = other.output.archives_dir;
        }
    }

    /// Parse the configured project types, ignoring names that don't parse.
    pub fn project_types(&self) -> Vec<ProjectType> {
        self.build
            .project_types
            .iter()
            .filter_map(|s| match s.parse() {
                Ok(t) => Some(t),
                Err(_) => {
                    tracing::warn!("ignoring unknown project type in config: {}", s);
                    None
                }
            })
            .collect()
    }

    /// Tool locations with configured overrides applied.
    pub fn tool_paths(&self) -> ToolPaths {
        let mut tools = ToolPaths::default();
        if let Some(mdtool) = &self.tools.mdtool {
            tools.mdtool = mdtool.clone();
        }
        if let Some(xbuild) = &self.tools.xbuild {
            tools.xbuild = xbuild.clone();
        }
        tools
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.xamarin-build/config.toml)
/// 2. Global config (~/.xamarin-build/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.xamarin-build).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.xamarin-build/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.xamarin-build/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}
