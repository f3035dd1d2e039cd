//! # pm-registry
//!
//! The project registry behind the pm CLI:
//! - A plain-text path list of tracked project directories
//! - A binary record file with name, last sync time and description
//! - Create / remove / list / open / sync operations over both
//!
//! # Examples
//!
//! ```no_run
//! use pm_core::StateDir;
//! use pm_registry::{Registry, RegistryPaths};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = StateDir::resolve()?;
//! let registry = Registry::open(RegistryPaths::from_state_dir(&state), "/home/me/work")?;
//!
//! registry.create("alpha", Some("first project"))?;
//! for record in registry.list()? {
//!     let record = record?;
//!     println!("{} {}", record.name, record.formatted_timestamp());
//! }
//! # Ok(())
//! # }
//! ```

mod atomic;
pub mod codec;
pub mod error;
pub mod lock;
pub mod opener;
pub mod path_list;
pub mod record;
pub mod record_file;
pub mod registry;
pub mod sync;

pub use error::{Error, Result};
pub use opener::{CommandOpener, Opener};
pub use record::{ProjectPathEntry, ProjectRecord, MAX_FIELD_BYTES};
pub use record_file::Records;
pub use registry::{Registry, RegistryPaths};
pub use sync::{RsyncSyncer, SyncOutcome, SyncStatus, Syncer};
