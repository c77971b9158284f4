//! Repository layer for persisted saves.
//!
//! Repositories handle data that CHANGES during play: world slots and zone
//! deltas. Static content (definitions, spawn tables, layouts) comes from
//! `zone-content` and is never saved.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepo;
pub use traits::{SaveRepository, validate_slot};
