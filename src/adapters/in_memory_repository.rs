//! In-memory table repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::SavedQTable,
};

/// In-memory repository for testing.
///
/// Stores encoded tables in a shared map keyed by location, so tests exercise
/// the same encoding as the file store without touching the file system.
/// Clones share the same storage.
///
/// # Examples
///
/// ```
/// use blackjack::adapters::InMemoryRepository;
/// use blackjack::ports::TableRepository;
/// use blackjack::q_learning::{QTable, SavedQTable};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// assert!(repo.load(Path::new("q_table"))?.is_none());
///
/// repo.save(&SavedQTable::new(&QTable::new(), 1.0), Path::new("q_table"))?;
/// assert!(repo.load(Path::new("q_table"))?.is_some());
/// # Ok::<(), blackjack::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.lock().map_err(|_| Error::LockPoisoned {
            operation: "in-memory repository access".to_string(),
        })
    }

    /// Number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().map(|storage| storage.len()).unwrap_or(0)
    }

    pub fn contains(&self, location: &Path) -> bool {
        self.storage()
            .map(|storage| storage.contains_key(&key(location)))
            .unwrap_or(false)
    }

    /// Store raw bytes at a location, bypassing encoding.
    ///
    /// Lets tests plant unreadable data.
    pub fn insert_raw(&self, location: &Path, bytes: Vec<u8>) -> Result<()> {
        self.storage()?.insert(key(location), bytes);
        Ok(())
    }
}

fn key(location: &Path) -> String {
    location.to_string_lossy().to_string()
}

impl TableRepository for InMemoryRepository {
    fn save(&self, saved: &SavedQTable, location: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize value table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage()?.insert(key(location), bytes);
        Ok(())
    }

    fn load(&self, location: &Path) -> Result<Option<SavedQTable>> {
        let storage = self.storage()?;
        let Some(bytes) = storage.get(&key(location)) else {
            return Ok(None);
        };

        let corrupt = |message: String| Error::StorageCorrupt {
            location: key(location),
            message,
        };
        let saved: SavedQTable =
            rmp_serde::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        saved.check().map_err(corrupt)?;
        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{q_learning::QTable, state::State};

    fn empty() -> SavedQTable {
        SavedQTable::new(&QTable::new(), 1.0)
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("q_table");
        let mut table = QTable::new();
        table.entry(&State::from_tokens(["9", "9"], "A").unwrap()).stand = 3.0;
        let saved = SavedQTable::new(&table, 0.5);

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&saved, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        assert_eq!(repo.load(path).unwrap(), Some(saved));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_bytes_are_reported() {
        let repo = InMemoryRepository::new();
        let path = Path::new("broken");
        repo.insert_raw(path, vec![0xc1, 0x00, 0xff]).unwrap();
        assert!(matches!(
            repo.load(path),
            Err(Error::StorageCorrupt { .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&empty(), path).unwrap();

        assert!(repo2.load(path).unwrap().is_some());
        assert_eq!(repo2.count(), 1);
    }
}
