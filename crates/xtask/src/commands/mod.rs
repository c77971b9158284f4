//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod layout;
mod list_saves;
mod normalize_deltas;
mod populate;
mod validate_content;

pub use layout::Layout;
pub use list_saves::ListSaves;
pub use normalize_deltas::NormalizeDeltas;
pub use populate::Populate;
pub use validate_content::ValidateContent;
