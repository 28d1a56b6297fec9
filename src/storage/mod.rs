pub mod json_backend;

use crate::core::state::BankState;
use crate::errors::Result;

/// Abstraction over persistence backends capable of storing the full bank
/// snapshot. The snapshot is always read and written whole; there is no
/// partial update path.
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted snapshot, or a fresh empty one when nothing has
    /// been written yet.
    fn load_or_default(&self) -> Result<BankState>;

    /// Writes the full snapshot, replacing whatever was persisted before.
    fn save(&self, state: &BankState) -> Result<()>;
}

pub use json_backend::JsonStorage;
