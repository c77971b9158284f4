//! Session orchestration for zone play.
//!
//! The durable half of the game is [`SaveData`]: world slots plus the zone
//! delta store. Zones themselves are transient. [`ZoneSession`] rebuilds the
//! active zone from its slot on entry, overlays the zone's delta, and routes
//! player interactions back into that delta.
//!
//! Modules are organized by responsibility:
//! - [`save`] defines the persisted root and its JSON codec
//! - [`session`] hosts the zone lifecycle and interaction events
//! - [`repository`] stores and loads saves (file and in-memory)
pub mod error;
pub mod repository;
pub mod save;
pub mod session;

pub use error::{Result, RuntimeError};
pub use repository::{FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveRepository};
pub use save::{PersistedState, SaveData};
pub use session::{InteractionOutcome, ZoneSession};
