//! Error types for pm-registry

use thiserror::Error;

/// Result type alias using pm-registry's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project registry error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project already exists
    #[error("Project '{name}' already exists at {path}")]
    ProjectExists { name: String, path: String },

    /// Project not found
    #[error("Project '{name}' not found in the list")]
    ProjectNotFound { name: String },

    /// Invalid project name
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A backing file could not be opened, read or written
    #[error("Cannot access {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The record file does not decode
    #[error("Record file {path} is corrupt: {message}")]
    CorruptRecordFile { path: String, message: String },

    /// An external program could not be started
    #[error("Failed to launch {program}: {message}")]
    LaunchFailed { program: String, message: String },

    /// Core library error
    #[error(transparent)]
    Core(#[from] pm_core::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::ProjectExists {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a project not found error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error for `path`
    pub fn storage(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupt record file error
    pub fn corrupt_record_file(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptRecordFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a launch failed error
    pub fn launch_failed(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Whether the process should stop with a non-zero exit code
    ///
    /// Lookup misses, duplicates and launch problems are reported and the
    /// command still counts as handled. Anything that leaves the backing
    /// store unusable is fatal.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::ProjectExists { .. }
            | Self::ProjectNotFound { .. }
            | Self::InvalidProjectName { .. }
            | Self::LaunchFailed { .. } => false,
            Self::Storage { .. } | Self::CorruptRecordFile { .. } => true,
            Self::Core(e) => !e.is_config_error(),
        }
    }
}
