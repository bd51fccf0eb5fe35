//! Serialization support for the value table.

use serde::{Deserialize, Serialize};

use crate::q_learning::q_table::{ActionValues, QTable};
use crate::state::State;

/// One stored state with its action values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub state: State,
    pub values: ActionValues,
}

/// Versioned on-disk form of a [`QTable`] together with the exploration rate
/// reached when it was written.
///
/// Entries are kept as a list rather than a map so the structured state keys
/// survive formats that only allow string map keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub epsilon: f64,
    pub entries: Vec<SavedEntry>,
}

impl SavedQTable {
    pub const VERSION: u32 = 2;

    /// Snapshot a table. Entries are sorted by state so identical tables
    /// encode to identical bytes.
    pub fn new(table: &QTable, epsilon: f64) -> Self {
        let mut entries: Vec<SavedEntry> = table
            .iter()
            .map(|(state, values)| SavedEntry {
                state: *state,
                values: *values,
            })
            .collect();
        entries.sort_by(|a, b| a.state.cmp(&b.state));

        Self {
            version: Self::VERSION,
            epsilon,
            entries,
        }
    }

    /// Check a decoded snapshot before it is trusted.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the snapshot was written by an
    /// unsupported format version or carries an exploration rate outside
    /// `[0, 1]`.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.version != Self::VERSION {
            return Err(format!(
                "unsupported format version {} (expected {})",
                self.version,
                Self::VERSION
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("stored epsilon {} is outside [0, 1]", self.epsilon));
        }
        Ok(())
    }

    /// Split into the rebuilt table and the stored exploration rate.
    pub fn into_parts(self) -> (QTable, f64) {
        let table = self
            .entries
            .into_iter()
            .map(|entry| (entry.state, entry.values))
            .collect();
        (table, self.epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> QTable {
        let mut table = QTable::new();
        table.insert(
            State::from_tokens(["10", "6"], "K").unwrap(),
            ActionValues {
                hit: -10.0,
                stand: 0.1 + 0.2,
            },
        );
        table.insert(
            State::from_tokens(["A", "A", "9"], "2").unwrap(),
            ActionValues {
                hit: f64::MIN_POSITIVE,
                stand: -1.0 / 3.0,
            },
        );
        table
    }

    #[test]
    fn test_msgpack_roundtrip_is_exact() {
        let table = sample_table();
        let bytes = rmp_serde::to_vec_named(&SavedQTable::new(&table, 0.37)).unwrap();
        let loaded: SavedQTable = rmp_serde::from_slice(&bytes).unwrap();
        assert!(loaded.check().is_ok());
        let (restored, epsilon) = loaded.into_parts();

        assert_eq!(restored, table);
        assert_eq!(epsilon, 0.37);
        for (state, values) in table.iter() {
            let other = restored.get(state).unwrap();
            assert_eq!(other.hit.to_bits(), values.hit.to_bits());
            assert_eq!(other.stand.to_bits(), values.stand.to_bits());
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let table = sample_table();
        let a = rmp_serde::to_vec_named(&SavedQTable::new(&table, 1.0)).unwrap();
        let b = rmp_serde::to_vec_named(&SavedQTable::new(&table.clone(), 1.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut saved = SavedQTable::new(&sample_table(), 1.0);
        saved.version = 1;
        assert!(saved.check().is_err());
        saved.version = 99;
        assert!(saved.check().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_epsilon() {
        for epsilon in [-0.1, 1.5, f64::NAN] {
            let saved = SavedQTable::new(&sample_table(), epsilon);
            assert!(saved.check().is_err(), "epsilon {epsilon}");
        }
    }
}
