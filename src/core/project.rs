//! Project and per-configuration settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::ProjectType;

/// Output type marking an application (as opposed to a library).
pub const OUTPUT_TYPE_EXE: &str = "exe";

/// A project inside a solution, as produced by the solution loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Project {
    /// Project name (used for `-p:` selection by the IDE tool)
    pub name: String,

    /// Path to the project file
    pub path: PathBuf,

    /// Platform family
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Output type (`exe`, `library`, ...)
    #[serde(default)]
    pub output_type: String,

    /// Assembly name, defaults to the project name
    #[serde(default)]
    pub assembly_name: Option<String>,

    /// Whether this Android project is an application module
    #[serde(default)]
    pub android_application: bool,

    /// Android manifest, relative to the project directory
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Solution config key -> project config key
    #[serde(default)]
    pub config_map: BTreeMap<String, String>,

    /// Project config key -> settings
    #[serde(default)]
    pub configs: BTreeMap<String, ProjectConfig>,
}

/// Settings of one project configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Configuration name (e.g. "Release")
    pub configuration: String,

    /// Platform name (e.g. "iPhone", "AnyCPU")
    pub platform: String,

    /// Build output directory, relative to the project directory
    #[serde(default)]
    pub output_dir: PathBuf,

    /// Whether the Android package should be signed
    #[serde(default)]
    pub sign_android: bool,

    /// Architectures built for Apple platforms
    #[serde(default)]
    pub mtouch_archs: Vec<String>,
}

impl Project {
    /// Create a project with no configurations.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, project_type: ProjectType) -> Self {
        Project {
            name: name.into(),
            path: path.into(),
            project_type,
            output_type: OUTPUT_TYPE_EXE.to_string(),
            assembly_name: None,
            android_application: false,
            manifest: None,
            config_map: BTreeMap::new(),
            configs: BTreeMap::new(),
        }
    }

    /// Map a solution config key onto a project config.
    pub fn with_config(
        mut self,
        solution_config: impl Into<String>,
        project_config: impl Into<String>,
        config: ProjectConfig,
    ) -> Self {
        let key = project_config.into();
        self.config_map.insert(solution_config.into(), key.clone());
        self.configs.insert(key, config);
        self
    }

    /// Directory containing the project file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Assembly name used to locate build products.
    pub fn assembly_name(&self) -> &str {
        self.assembly_name.as_deref().unwrap_or(&self.name)
    }

    /// Default Android manifest location when none is declared.
    pub fn manifest_path(&self) -> PathBuf {
        match &self.manifest {
            Some(manifest) => self.dir().join(manifest),
            None => self.dir().join("Properties").join("AndroidManifest.xml"),
        }
    }

    pub fn is_executable(&self) -> bool {
        self.output_type.eq_ignore_ascii_case(OUTPUT_TYPE_EXE)
    }

    /// Make the project path and all output directories absolute.
    pub(crate) fn resolve_paths(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }

        let dir = self.dir().to_path_buf();
        for config in self.configs.values_mut() {
            if config.output_dir.is_relative() {
                config.output_dir = dir.join(&config.output_dir);
            }
        }
    }
}

impl ProjectConfig {
    pub fn new(configuration: impl Into<String>, platform: impl Into<String>) -> Self {
        ProjectConfig {
            configuration: configuration.into(),
            platform: platform.into(),
            ..Default::default()
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_archs<I, S>(mut self, archs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mtouch_archs = archs.into_iter().map(Into::into).collect();
        self
    }

    pub fn signed(mut self, sign: bool) -> Self {
        self.sign_android = sign;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        let mut project = Project::new("App", "App/App.csproj", ProjectType::Ios).with_config(
            "Release|iPhone",
            "Release|iPhone",
            ProjectConfig::new("Release", "iPhone").with_output_dir("bin/iPhone/Release"),
        );

        project.resolve_paths(Path::new("/work"));

        assert_eq!(project.path, PathBuf::from("/work/App/App.csproj"));
        assert_eq!(
            project.configs["Release|iPhone"].output_dir,
            PathBuf::from("/work/App/bin/iPhone/Release")
        );
    }

    #[test]
    fn test_assembly_name_fallback() {
        let mut project = Project::new("Droid", "Droid.csproj", ProjectType::Android);
        assert_eq!(project.assembly_name(), "Droid");

        project.assembly_name = Some("com.droid".to_string());
        assert_eq!(project.assembly_name(), "com.droid");
    }

    #[test]
    fn test_manifest_path_default() {
        let project = Project::new("Droid", "/src/Droid/Droid.csproj", ProjectType::Android);
        assert_eq!(
            project.manifest_path(),
            PathBuf::from("/src/Droid/Properties/AndroidManifest.xml")
        );
    }

    #[test]
    fn test_is_executable_ignores_case() {
        let mut project = Project::new("App", "App.csproj", ProjectType::Ios);
        project.output_type = "Exe".to_string();
        assert!(project.is_executable());

        project.output_type = "library".to_string();
        assert!(!project.is_executable());
    }
}
