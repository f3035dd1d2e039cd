//! Error types for pm-core

use thiserror::Error;

/// Result type alias using pm-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pm
#[derive(Error, Debug)]
pub enum Error {
    /// Neither `$HOME` nor the platform lookup produced a home directory
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// A filesystem path that camino cannot represent
    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    /// A configuration key the current operation depends on is absent
    #[error("Missing configuration key '{key}' in {path}")]
    MissingConfigKey { key: String, path: String },

    /// A configuration value that cannot be used as written
    #[error("Invalid value for '{key}' in {path}: {message}")]
    InvalidConfigValue {
        key: String,
        path: String,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a non-UTF-8 path error
    pub fn non_utf8_path(path: impl Into<String>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }

    /// Create a missing config key error
    pub fn missing_config_key(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingConfigKey {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config_value(
        key: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from the user's settings rather than the system
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingConfigKey { .. } | Self::InvalidConfigValue { .. }
        )
    }
}
