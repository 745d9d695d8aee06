//! Centralized shell output and progress management.
//!
//! All CLI output goes through [`Shell`]:
//! - Status messages with consistent formatting (stderr)
//! - A spinner while external tools run (via indicatif)
//! - JSON events, one per line on stdout, for `--message-format json`
//!
//! Human and JSON output are mutually exclusive.

use std::fmt::{self, Display};
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::events::BuildEvent;

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable status lines on stderr.
    Human { verbosity: Verbosity },
    /// Machine-readable JSON events on stdout.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            verbosity: Verbosity::Normal,
        }
    }
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, no spinner
    Quiet,
    /// Default: status messages + spinner
    #[default]
    Normal,
    /// --verbose: status messages and debug logs, no spinner
    Verbose,
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Found,
    Removed,

    // In-progress statuses (cyan)
    Building,
    Running,
    Planned,

    // Warning statuses (yellow)
    Skipped,
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Found => "Found",
            Status::Removed => "Removed",
            Status::Building => "Building",
            Status::Running => "Running",
            Status::Planned => "Planned",
            Status::Skipped => "Skipped",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Found | Status::Removed => "\x1b[1;32m",
            Status::Building | Status::Running | Status::Planned => "\x1b[1;36m",
            Status::Skipped | Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl Shell {
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match mode {
            ShellMode::Json => false,
            ShellMode::Human { .. } => io::stderr().is_terminal(),
        };

        Shell {
            mode,
            use_color,
            spinner: Mutex::new(None),
        }
    }

    /// Create a shell from CLI flags. JSON mode takes precedence over
    /// quiet/verbose.
    pub fn from_flags(quiet: bool, verbose: bool, message_format_json: bool) -> Self {
        let mode = if message_format_json {
            ShellMode::Json
        } else {
            let verbosity = if quiet {
                Verbosity::Quiet
            } else if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity }
        };

        Shell::new(mode)
    }

    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet
            }
        )
    }

    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose
            }
        )
    }

    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// In quiet mode, only Error status is printed. In JSON mode, messages
    /// are ignored (use [`Shell::event`]).
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() {
            return;
        }
        if self.is_quiet() && status != Status::Error {
            return;
        }

        let line = format!("{} {}", self.format_status(status), msg);
        self.suspend_spinner(|| eprintln!("{}", line));
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print a JSON event to stdout. Ignored in human mode.
    pub fn event(&self, event: &BuildEvent) {
        if !self.is_json() {
            return;
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", event.to_json());
        let _ = stdout.flush();
    }

    /// Print a line of primary output to stdout (human mode only).
    pub fn print(&self, msg: impl Display) {
        if self.is_json() {
            return;
        }
        let line = msg.to_string();
        self.suspend_spinner(|| println!("{}", line));
    }

    /// Show a spinner until [`Shell::finish_spinner`] is called.
    ///
    /// Only shown in normal human mode on a terminal.
    pub fn start_spinner(&self, msg: impl Display) {
        if self.is_json() || self.is_quiet() || self.is_verbose() || !io::stderr().is_terminal() {
            return;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    /// Update the spinner message, if a spinner is showing.
    pub fn set_spinner_message(&self, msg: impl Display) {
        if let Ok(spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.as_ref() {
                pb.set_message(msg.to_string());
            }
        }
    }

    pub fn finish_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn suspend_spinner<F: FnOnce()>(&self, f: F) {
        match self.spinner.lock() {
            Ok(spinner) => match spinner.as_ref() {
                Some(pb) => pb.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();

        if self.use_color {
            format!("{}{:>width$}\x1b[0m", status.color_code(), text, width = STATUS_WIDTH)
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("mode", &self.mode)
            .field("use_color", &self.use_color)
            .finish_non_exhaustive()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ShellMode::default())
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_modes() {
        let shell = Shell::new(ShellMode::Human {
            verbosity: Verbosity::Normal,
        });
        assert!(!shell.is_quiet());
        assert!(!shell.is_verbose());
        assert!(!shell.is_json());

        let quiet_shell = Shell::new(ShellMode::Human {
            verbosity: Verbosity::Quiet,
        });
        assert!(quiet_shell.is_quiet());

        assert!(Shell::new(ShellMode::Json).is_json());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.50s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_status_formatting() {
        let shell = Shell::new(ShellMode::Json);

        let formatted = shell.format_status(Status::Running);
        assert_eq!(formatted.trim(), "Running");
        assert_eq!(formatted.len(), 12);
    }

    #[test]
    fn test_from_flags() {
        let shell = Shell::from_flags(false, true, false);
        assert!(shell.is_verbose());

        let shell = Shell::from_flags(true, false, false);
        assert!(shell.is_quiet());

        // JSON takes precedence
        let shell = Shell::from_flags(true, true, true);
        assert!(shell.is_json());
        assert!(!shell.is_quiet());
    }

    #[test]
    fn test_spinner_not_shown_in_json_mode() {
        let shell = Shell::new(ShellMode::Json);
        shell.start_spinner("building");
        assert!(shell.spinner.lock().unwrap().is_none());
        shell.finish_spinner();
    }
}
