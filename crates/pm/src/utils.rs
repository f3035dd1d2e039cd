//! Utility functions shared across CLI commands

use anyhow::Result;
use pm_core::{paths, PmConfig, StateDir};
use pm_registry::{Registry, RegistryPaths};

/// Open the registry in the state directory, rooted at the current directory
pub fn open_registry() -> Result<Registry> {
    let state = StateDir::resolve()?;
    state.ensure()?;

    let cwd = paths::to_utf8(std::env::current_dir().map_err(pm_core::Error::Io)?)?;
    tracing::debug!("Registry at {}, workspace root {}", state.root(), cwd);

    Ok(Registry::open(RegistryPaths::from_state_dir(&state), cwd)?)
}

/// Load `config` from the state directory
pub fn load_config() -> Result<PmConfig> {
    let state = StateDir::resolve()?;
    Ok(PmConfig::load(&state.config_file())?)
}
