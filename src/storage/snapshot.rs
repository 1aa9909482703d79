use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Entry;
use crate::io::{CsvLoad, read_entries_csv, write_entries_csv};

/// Flat-file snapshot store.
///
/// The whole ledger is rewritten on every save. At a human-scale row count
/// that is cheaper than maintaining a log; it becomes the thing to revisit
/// first if the ledger ever grows past that.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. A missing file is an empty ledger, not an error.
    pub fn load(&self) -> Result<CsvLoad> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(CsvLoad {
                    entries: Vec::new(),
                    rejected: Vec::new(),
                });
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to open snapshot {}", self.path.display())
                });
            }
        };

        read_entries_csv(file)
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))
    }

    /// Rewrite the full snapshot.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to write snapshot {}", self.path.display()))?;
        write_entries_csv(entries, file)?;
        Ok(())
    }
}
