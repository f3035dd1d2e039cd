//! # pm-core
//!
//! Core library for the pm CLI providing:
//! - State directory resolution (`~/.config/pm` or `$PM_HOME`)
//! - `KEY=value` configuration file parsing
//! - The shared error type

pub mod config;
pub mod error;
pub mod paths;

pub use config::PmConfig;
pub use error::{Error, Result};
pub use paths::{get_home_dir, StateDir};
