//! Shared CLI plumbing: errors, exit codes and project file access.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::export::ExportError;
use crate::models::{parse_frame_number, EditError};
use crate::services::{EditorSession, ProjectService};
use crate::transit::TransitError;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed.
    Success = 0,
    /// Bad input: arguments, project contents or payload.
    ValidationError = 1,
    /// A file could not be read or written.
    IoError = 2,
}

impl ExitCode {
    /// Numeric process status.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Which class of failure a [`CliError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid input.
    Validation,
    /// File system failure.
    Io,
}

/// Error reported by a subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure class, decides the exit code.
    pub kind: CliErrorKind,
    /// Message printed to stderr.
    pub message: String,
}

impl CliError {
    /// Invalid input (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// File system failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<EditError> for CliError {
    fn from(err: EditError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<TransitError> for CliError {
    fn from(err: TransitError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// User config, or defaults when it is missing or unreadable.
pub fn load_config() -> Config {
    Config::load().unwrap_or_default()
}

/// Reads and parses a project file.
///
/// Read failures are I/O errors; anything wrong with the contents is a
/// validation error.
pub fn load_project(path: &Path, config: &Config) -> CliResult<EditorSession> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io(format!("Failed to read project {}: {e}", path.display()))
    })?;

    ProjectService::parse(&content, config.editor.default_speed_ms)
        .map_err(|e| CliError::validation(format!("Invalid project {}: {e:#}", path.display())))
}

/// Writes a project file atomically.
pub fn save_project(session: &EditorSession, path: &Path) -> CliResult<()> {
    ProjectService::save(session, path).map_err(|e| CliError::io(format!("{e:#}")))
}

/// Writes generated text, creating parent directories.
pub fn write_output(path: &Path, content: &str) -> CliResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            CliError::io(format!("Failed to create directory {}: {e}", dir.display()))
        })?;
    }
    fs::write(path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))
}

/// Parses an optional 1-based frame argument.
pub fn parse_optional_frame(input: Option<&str>) -> CliResult<Option<usize>> {
    input
        .map(parse_frame_number)
        .transpose()
        .map_err(CliError::from)
}
