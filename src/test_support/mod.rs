//! Test utilities and fakes for xamarin-builder unit tests.
//!
//! This module is only compiled for tests. It provides solution fixtures,
//! a recording [`CommandRunner`] and recording [`BuildHooks`].

use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tempfile::TempDir;

use crate::builder::command::BuildCommand;
use crate::builder::errors::BuildError;
use crate::builder::executor::{BuildHooks, CommandRunner};
use crate::core::{Project, ProjectConfig, ProjectType, Solution};

/// Solution configurations declared by the fixture solutions.
pub const FIXTURE_CONFIGURATIONS: &[&str] =
    &["Release|iPhone", "Release|Any CPU", "Debug|iPhoneSimulator"];

fn fixture_configurations() -> Vec<String> {
    FIXTURE_CONFIGURATIONS.iter().map(|s| s.to_string()).collect()
}

/// A solution at `/src/App.sln` holding `projects`. Nothing exists on disk.
pub fn solution_with(projects: Vec<Project>) -> Solution {
    Solution::new("/src/App.sln", fixture_configurations(), projects)
}

/// Like [`solution_with`], but the `.sln` file exists in a temp directory.
pub fn temp_solution(projects: Vec<Project>) -> (TempDir, Solution) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("App.sln");
    std::fs::write(&path, "").unwrap();
    (tmp, Solution::new(path, fixture_configurations(), projects))
}

/// An executable iOS project mapping `Release|iPhone`.
pub fn ios_project(name: &str, archs: &[&str]) -> Project {
    Project::new(
        name,
        format!("/src/{name}/{name}.csproj"),
        ProjectType::Ios,
    )
    .with_config(
        "Release|iPhone",
        "Release|iPhone",
        ProjectConfig::new("Release", "iPhone")
            .with_output_dir(format!("/src/{name}/bin/iPhone/Release"))
            .with_archs(archs.iter().copied()),
    )
}

/// An executable macOS project mapping `Release|Any CPU`.
pub fn macos_project(name: &str, archs: &[&str]) -> Project {
    Project::new(
        name,
        format!("/src/{name}/{name}.csproj"),
        ProjectType::MacOs,
    )
    .with_config(
        "Release|Any CPU",
        "Release|Any CPU",
        ProjectConfig::new("Release", "AnyCPU")
            .with_output_dir(format!("/src/{name}/bin/Release"))
            .with_archs(archs.iter().copied()),
    )
}

/// An Android project mapping `Release|Any CPU`.
pub fn android_project(name: &str, application: bool, sign: bool, platform: &str) -> Project {
    let mut project = Project::new(
        name,
        format!("/src/{name}/{name}.csproj"),
        ProjectType::Android,
    )
    .with_config(
        "Release|Any CPU",
        "Release|Any CPU",
        ProjectConfig::new("Release", platform)
            .with_output_dir(format!("/src/{name}/bin/Release"))
            .signed(sign),
    );
    project.output_type = "library".to_string();
    project.android_application = application;
    project
}

/// Create an empty file at `path` last modified `age_secs` ago.
pub fn touch_at(path: &Path, age_secs: u64) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();

    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

/// Write a minimal AndroidManifest.xml declaring `package`.
pub fn write_manifest(path: &Path, package: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(
        path,
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" android:versionCode="1" package="{package}">
  <application android:label="{package}" />
</manifest>
"#
        ),
    )
    .unwrap();
}

/// Runner that records commands instead of spawning them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    runs: Vec<BuildCommand>,
    attempts: usize,
    fail_at: Option<usize>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// A runner whose `n`th attempt (zero based) fails.
    pub fn failing_at(n: usize) -> Self {
        RecordingRunner {
            fail_at: Some(n),
            ..Default::default()
        }
    }

    /// Commands that ran successfully.
    pub fn runs(&self) -> &[BuildCommand] {
        &self.runs
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &BuildCommand) -> Result<()> {
        let attempt = self.attempts;
        self.attempts += 1;

        if self.fail_at == Some(attempt) {
            return Err(BuildError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
            }
            .into());
        }

        self.runs.push(command.clone());
        Ok(())
    }
}

/// Hooks that record what they see.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    /// `(project name, already performed)` per observed command
    pub observed: Vec<(String, bool)>,
    /// Number of prepare calls
    pub prepared: usize,
    extra_arg: Option<String>,
}

impl RecordingHooks {
    /// Hooks that append `arg` to every prepared command.
    pub fn with_extra_arg(arg: impl Into<String>) -> Self {
        RecordingHooks {
            extra_arg: Some(arg.into()),
            ..Default::default()
        }
    }
}

impl BuildHooks for RecordingHooks {
    fn prepare_command(&mut self, _project: &Project, command: &mut BuildCommand) {
        self.prepared += 1;
        if let Some(arg) = &self.extra_arg {
            command.push_arg(arg.clone());
        }
    }

    fn observe_command(&mut self, project: &Project, _command: &BuildCommand, already_performed: bool) {
        self.observed.push((project.name.clone(), already_performed));
    }
}
