//! Configuration loading and management

mod loader;

pub use loader::{PmConfig, EDITOR_KEY, RSYNC_DEST_KEY};
