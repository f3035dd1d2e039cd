//! `KEY=value` configuration file loading and parsing

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Editor command used by `pm open`
pub const EDITOR_KEY: &str = "EDITOR";

/// rsync destination used by `pm rsync`
pub const RSYNC_DEST_KEY: &str = "RSYNC_DEST";

/// Loaded pm configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PmConfig {
    /// Editor command line, e.g. `nvim` or `code -n`
    pub editor: Option<String>,

    /// rsync destination, e.g. `backup:/srv/projects`
    pub rsync_dest: Option<String>,

    /// Path the configuration was read from
    pub config_path: Utf8PathBuf,
}

impl PmConfig {
    /// Load configuration from `path`
    ///
    /// A missing file yields the empty configuration.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path);
                String::new()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut config = Self::parse(&content);
        config.config_path = path.to_owned();
        Ok(config)
    }

    /// Parse `KEY=value` lines
    ///
    /// Blank lines and `#` comments are skipped. The first occurrence of a
    /// key wins. Empty values count as unset.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for (lineno, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!("Ignoring config line {}: expected KEY=value", lineno + 1);
                continue;
            };

            let value = value.trim();
            let slot = match key.trim() {
                EDITOR_KEY => &mut config.editor,
                RSYNC_DEST_KEY => &mut config.rsync_dest,
                other => {
                    tracing::debug!("Ignoring unknown config key '{}'", other);
                    continue;
                }
            };

            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.to_string());
            }
        }

        config
    }

    /// The editor split into program and leading arguments
    ///
    /// Split with shell quoting rules, so `"/opt/My Editor/ed" -w` names
    /// one program. `None` when no editor is configured.
    pub fn editor_command(&self) -> Result<Option<(String, Vec<String>)>> {
        let Some(editor) = self.editor.as_deref() else {
            return Ok(None);
        };

        let mut words = shell_words::split(editor)
            .map_err(|e| {
                Error::invalid_config_value(EDITOR_KEY, self.config_path.as_str(), e.to_string())
            })?
            .into_iter();
        Ok(words.next().map(|program| (program, words.collect())))
    }

    /// The rsync destination, or an error naming the missing key
    pub fn require_rsync_dest(&self) -> Result<&str> {
        self.rsync_dest
            .as_deref()
            .ok_or_else(|| Error::missing_config_key(RSYNC_DEST_KEY, self.config_path.as_str()))
    }
}
