//! Fatal build errors.

use std::path::PathBuf;

use thiserror::Error;

/// An error that aborts a whole build, collect or clean pass.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("solution not found: {}", .path.display())]
    SolutionNotFound { path: PathBuf },

    #[error("invalid solution path `{}`: expected a .sln file", .path.display())]
    InvalidSolutionPath { path: PathBuf },

    #[error("configuration `{config}` is not declared by solution `{}`", .solution.display())]
    MissingSolutionConfig { config: String, solution: PathBuf },

    #[error("`{command}` failed with exit code {}", exit_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("no package name found in android manifest: {}", .path.display())]
    MissingPackageName { path: PathBuf },
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = BuildError::CommandFailed {
            command: "xbuild App.sln /target:Build".to_string(),
            code: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "`xbuild App.sln /target:Build` failed with exit code 1"
        );

        let err = BuildError::CommandFailed {
            command: "mdtool build".to_string(),
            code: None,
        };
        assert!(err.to_string().ends_with("exit code none"));
    }

    #[test]
    fn test_missing_config_message() {
        let err = BuildError::MissingSolutionConfig {
            config: "Release|iPhone".to_string(),
            solution: PathBuf::from("App.sln"),
        };
        assert!(err.to_string().contains("`Release|iPhone`"));
    }
}
