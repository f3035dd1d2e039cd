//! Opening a project directory in an editor or the desktop file opener

use crate::error::{Error, Result};
use camino::Utf8Path;
use pm_core::PmConfig;

/// Launches something on a project directory
pub trait Opener {
    fn open(&self, path: &Utf8Path) -> Result<()>;
}

/// Runs `program [args..] <path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The configured `EDITOR`, else the platform opener
    pub fn from_config(config: &PmConfig) -> Result<Self> {
        Ok(match config.editor_command()? {
            Some((program, args)) => Self::new(program, args),
            None => Self::platform_default(),
        })
    }

    pub fn platform_default() -> Self {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(windows) {
            "explorer"
        } else {
            "xdg-open"
        };
        Self::new(program, Vec::new())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Opener for CommandOpener {
    fn open(&self, path: &Utf8Path) -> Result<()> {
        let program = which::which(&self.program)
            .map_err(|e| Error::launch_failed(&self.program, e.to_string()))?;

        let mut args = self.args.clone();
        args.push(path.to_string());
        tracing::debug!("Running {} {}", program.display(), args.join(" "));

        let output = duct::cmd(&program, &args)
            .unchecked()
            .run()
            .map_err(|e| Error::launch_failed(&self.program, e.to_string()))?;

        if !output.status.success() {
            tracing::warn!("{} exited with {}", self.program, output.status);
        }
        Ok(())
    }
}
