//! MessagePack implementation of the table repository.
//!
//! Tables are encoded with `rmp_serde` using named fields, so the files are
//! self-describing, and written through a temporary sibling file that is
//! renamed over the destination once complete.

use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::SavedQTable,
};

/// MessagePack-based table repository.
///
/// # Examples
///
/// ```no_run
/// use blackjack::adapters::MsgPackRepository;
/// use blackjack::ports::TableRepository;
/// use blackjack::q_learning::{QTable, SavedQTable};
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// repo.save(&SavedQTable::new(&QTable::new(), 1.0), Path::new("q_table.msgpack"))?;
/// let loaded = repo.load(Path::new("q_table.msgpack"))?;
/// assert!(loaded.is_some());
/// # Ok::<(), blackjack::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

fn temp_path(location: &Path) -> PathBuf {
    let name = location
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    location.with_file_name(format!(".tmp_{}_{name}", std::process::id()))
}

fn corrupt(location: &Path, message: impl Into<String>) -> Error {
    Error::StorageCorrupt {
        location: location.display().to_string(),
        message: message.into(),
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl TableRepository for MsgPackRepository {
    fn save(&self, saved: &SavedQTable, location: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize value table to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        let temp = temp_path(location);
        if let Err(source) = write_synced(&temp, &bytes) {
            let _ = fs::remove_file(&temp);
            return Err(Error::Io {
                operation: format!("write file {temp:?}"),
                source,
            });
        }

        if let Err(source) = fs::rename(&temp, location) {
            let _ = fs::remove_file(&temp);
            return Err(Error::Io {
                operation: format!("replace {location:?}"),
                source,
            });
        }
        debug!(location = %location.display(), bytes = bytes.len(), "wrote value table");

        Ok(())
    }

    fn load(&self, location: &Path) -> Result<Option<SavedQTable>> {
        let file = match File::open(location) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(location = %location.display(), "no stored value table");
                return Ok(None);
            }
            Err(e) => return Err(corrupt(location, e.to_string())),
        };

        let saved: SavedQTable = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| corrupt(location, e.to_string()))?;
        saved.check().map_err(|message| corrupt(location, message))?;

        Ok(Some(saved))
    }
}
