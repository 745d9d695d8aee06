//! Solution description loading.
//!
//! The solution model is produced from a TOML description that lists the
//! solution file, its declared configurations and every project with its
//! configuration mapping. Projects keep their declaration order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::Project;

/// Default file name of a solution description.
pub const SOLUTION_DESCRIPTION: &str = "Solution.toml";

/// A multi-project solution.
#[derive(Debug, Clone)]
pub struct Solution {
    path: PathBuf,
    configurations: Vec<String>,
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SolutionDescription {
    solution: PathBuf,
    #[serde(default)]
    configurations: Vec<String>,
    #[serde(default)]
    projects: Vec<Project>,
}

impl Solution {
    /// Create a solution from already resolved parts.
    pub fn new(path: impl Into<PathBuf>, configurations: Vec<String>, projects: Vec<Project>) -> Self {
        Solution {
            path: path.into(),
            configurations,
            projects,
        }
    }

    /// Load a solution description file.
    pub fn load(description: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(description).with_context(|| {
            format!("failed to read solution description: {}", description.display())
        })?;

        let base = description_dir(description)?;
        Self::parse(&contents, &base)
            .with_context(|| format!("failed to parse solution description: {}", description.display()))
    }

    /// Parse a description whose relative paths are anchored at `base`.
    pub fn parse(contents: &str, base: &Path) -> Result<Self> {
        let desc: SolutionDescription = toml::from_str(contents)?;

        let path = if desc.solution.is_relative() {
            base.join(&desc.solution)
        } else {
            desc.solution
        };

        let mut projects = desc.projects;
        for project in &mut projects {
            project.resolve_paths(base);
        }

        tracing::debug!(
            "loaded solution {} with {} project(s)",
            path.display(),
            projects.len()
        );

        Ok(Solution {
            path,
            configurations: desc.configurations,
            projects,
        })
    }

    /// Path of the solution file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Solution config keys declared by the solution.
    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    pub fn has_configuration(&self, key: &str) -> bool {
        self.configurations.iter().any(|c| c == key)
    }

    /// Projects in declaration order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }
}

/// Absolute directory of a description file.
///
/// Tools run with the project directory as working directory, so every
/// path handed to them must be absolute.
fn description_dir(description: &Path) -> Result<PathBuf> {
    let dir = description
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::path::absolute(dir)
        .with_context(|| format!("failed to resolve directory of {}", description.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectType;
    use tempfile::TempDir;

    const DESCRIPTION: &str = r#"
solution = "MyApp.sln"
configurations = ["Release|iPhone", "Release|Any CPU"]

[[projects]]
name = "MyApp.iOS"
path = "MyApp.iOS/MyApp.iOS.csproj"
type = "ios"
output-type = "exe"
assembly-name = "MyApp"

[projects.config-map]
"Release|iPhone" = "Release|iPhone"

[projects.configs."Release|iPhone"]
configuration = "Release"
platform = "iPhone"
output-dir = "bin/iPhone/Release"
mtouch-archs = ["ARM64"]

[[projects]]
name = "MyApp.Droid"
path = "MyApp.Droid/MyApp.Droid.csproj"
type = "android"
android-application = true

[[projects]]
name = "MyApp.Windows"
path = "MyApp.Windows/MyApp.Windows.csproj"
type = "uwp"
"#;

    #[test]
    fn test_parse_description() {
        let solution = Solution::parse(DESCRIPTION, Path::new("/src")).unwrap();

        assert_eq!(solution.path(), Path::new("/src/MyApp.sln"));
        assert!(solution.has_configuration("Release|iPhone"));
        assert!(!solution.has_configuration("Debug|iPhone"));

        let names: Vec<_> = solution.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["MyApp.iOS", "MyApp.Droid", "MyApp.Windows"]);

        let ios = solution.project("MyApp.iOS").unwrap();
        assert_eq!(ios.assembly_name(), "MyApp");
        assert_eq!(ios.configs["Release|iPhone"].mtouch_archs, vec!["ARM64"]);
        assert_eq!(
            ios.configs["Release|iPhone"].output_dir,
            PathBuf::from("/src/MyApp.iOS/bin/iPhone/Release")
        );

        let droid = solution.project("MyApp.Droid").unwrap();
        assert!(droid.android_application);
        assert!(droid.config_map.is_empty());

        let uwp = solution.project("MyApp.Windows").unwrap();
        assert_eq!(uwp.project_type, ProjectType::Unknown);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SOLUTION_DESCRIPTION);
        std::fs::write(&path, DESCRIPTION).unwrap();

        let solution = Solution::load(&path).unwrap();
        assert_eq!(solution.path(), tmp.path().join("MyApp.sln"));
        assert_eq!(solution.projects().len(), 3);
    }

    #[test]
    fn test_description_dir_is_absolute() {
        assert!(description_dir(Path::new("Solution.toml")).unwrap().is_absolute());

        let nested = description_dir(Path::new("sub/Solution.toml")).unwrap();
        assert!(nested.is_absolute());
        assert!(nested.ends_with("sub"));

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SOLUTION_DESCRIPTION);
        assert_eq!(description_dir(&path).unwrap(), std::path::absolute(tmp.path()).unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Solution::load(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read solution description"));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = Solution::parse("solution = [", Path::new("/")).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
