//! Build event types for JSON output.
//!
//! These events are emitted one per line when using `--message-format=json`.
//!
//! # Event Types
//!
//! - `build-started`: A build pass started
//! - `command`: A planned command is about to run or was skipped as a duplicate
//! - `warning`: A project was skipped
//! - `artifact`: A build product was found
//! - `clean`: A build directory is about to be removed
//! - `build-finished`: Build completed (success or failure)
//!
//! New fields may be added, but existing fields should not be removed or renamed.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{OutputType, ProjectType};

/// A build event emitted during a build, collect or clean pass.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reason")]
pub enum BuildEvent {
    /// A build pass started.
    #[serde(rename = "build-started")]
    BuildStarted {
        /// Requested configuration (e.g. "Release")
        configuration: String,
        /// Requested platform (e.g. "iPhone")
        platform: String,
    },

    /// A planned command.
    #[serde(rename = "command")]
    Command {
        /// Project the command was planned for
        project: String,
        /// Rendered command line
        command: String,
        /// Whether an equal command already ran in this pass
        already_performed: bool,
    },

    /// A non-fatal warning.
    #[serde(rename = "warning")]
    Warning { message: String },

    /// A discovered build product.
    #[serde(rename = "artifact")]
    Artifact {
        project_type: ProjectType,
        kind: OutputType,
        path: PathBuf,
    },

    /// A directory about to be removed by `clean`.
    #[serde(rename = "clean")]
    Clean { project: String, path: PathBuf },

    /// Build completed (success or failure).
    #[serde(rename = "build-finished")]
    BuildFinished {
        /// Whether the build succeeded
        success: bool,
        /// Total build duration in milliseconds
        duration_ms: u64,
        /// Number of commands that ran
        #[serde(skip_serializing_if = "Option::is_none")]
        commands_run: Option<u64>,
    },
}

impl BuildEvent {
    pub fn started(configuration: impl Into<String>, platform: impl Into<String>) -> Self {
        BuildEvent::BuildStarted {
            configuration: configuration.into(),
            platform: platform.into(),
        }
    }

    pub fn command(project: impl Into<String>, command: impl Into<String>, already_performed: bool) -> Self {
        BuildEvent::Command {
            project: project.into(),
            command: command.into(),
            already_performed,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        BuildEvent::Warning {
            message: message.into(),
        }
    }

    pub fn artifact(project_type: ProjectType, kind: OutputType, path: impl Into<PathBuf>) -> Self {
        BuildEvent::Artifact {
            project_type,
            kind,
            path: path.into(),
        }
    }

    pub fn clean(project: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        BuildEvent::Clean {
            project: project.into(),
            path: path.into(),
        }
    }

    pub fn finished(success: bool, duration_ms: u64) -> Self {
        BuildEvent::BuildFinished {
            success,
            duration_ms,
            commands_run: None,
        }
    }

    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
