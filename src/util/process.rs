//! Spawning the external build tools.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::builder::errors::BuildError;

/// A tool invocation: program, arguments, extra environment and working
/// directory. Output is inherited so the tool's log streams to the user.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string_lossy().into_owned()));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn get_program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Run the tool to completion. A non-zero exit is
    /// [`BuildError::CommandFailed`].
    pub fn status_and_check(&self) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("spawning {}", self.display_command());
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: self.display_command(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    /// The invocation as one line, for logs and errors.
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Look a tool up on PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_status_and_check_reports_exit_code() {
        let err = ProcessBuilder::new("sh")
            .args(["-c", "exit 3"])
            .status_and_check()
            .unwrap_err();

        match err.downcast_ref::<BuildError>() {
            Some(BuildError::CommandFailed { code, .. }) => assert_eq!(*code, Some(3)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_status_and_check_uses_cwd_and_env() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("App.csproj"), "").unwrap();

        ProcessBuilder::new("sh")
            .args(["-c", "test -f App.csproj && test \"$MONO_IOMAP\" = all"])
            .env("MONO_IOMAP", "all")
            .cwd(tmp.path())
            .status_and_check()
            .unwrap();
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("xbuild").args(["App.sln", "/target:Build"]);

        assert_eq!(pb.display_command(), "xbuild App.sln /target:Build");
    }
}
