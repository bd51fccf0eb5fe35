//! Repository port for value table persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedQTable};

/// Port for persisting and loading value tables.
///
/// Implementations must distinguish a location that holds nothing (not an
/// error) from one whose contents cannot be read back (an error).
///
/// # Examples
///
/// ```no_run
/// use blackjack::ports::TableRepository;
/// use blackjack::q_learning::{QTable, SavedQTable};
/// use std::path::Path;
///
/// fn backup<R: TableRepository>(repo: &R, table: &QTable) -> blackjack::Result<()> {
///     repo.save(&SavedQTable::new(table, 1.0), Path::new("q_table.bak.msgpack"))
/// }
/// ```
pub trait TableRepository: Send + Sync {
    /// Save a snapshot, replacing whatever the location held before.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, saved: &SavedQTable, location: &Path) -> Result<()>;

    /// Load a snapshot that has passed [`SavedQTable::check`].
    ///
    /// Returns `Ok(None)` when nothing has been stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StorageCorrupt`] if stored data exists but
    /// cannot be read, decoded or checked.
    fn load(&self, location: &Path) -> Result<Option<SavedQTable>>;
}
