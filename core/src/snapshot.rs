//! Snapshot store: saved layouts as timestamp-named JSON files.
//!
//! RULE: Only this module touches the save directory.
//!
//! Layout on disk is a flat directory of `seat_YYYYMMDD_HHMMSS.json`
//! files, one document each, pretty-printed with 2-space indentation
//! and non-ASCII text left unescaped. Filenames sort chronologically,
//! so listing is a reverse name sort. There is no index, no locking
//! and no delete operation.

use crate::{
    clock::{snapshot_id, LocalClock, SnapshotClock},
    error::{SeatError, SeatResult},
    types::SnapshotId,
};
use log::{debug, info};
use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const SNAPSHOT_EXTENSION: &str = ".json";

/// Where a saved snapshot landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub id:   SnapshotId,
    pub path: PathBuf,
}

pub struct SnapshotStore {
    dir:   PathBuf,
    clock: Box<dyn SnapshotClock>,
}

impl SnapshotStore {
    /// Open (or create) the save directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> SeatResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            clock: Box::new(LocalClock),
        })
    }

    /// Replace the clock used to name new snapshots.
    pub fn with_clock(mut self, clock: impl SnapshotClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `document` under a fresh timestamp identifier.
    /// A save within the same second as a previous one overwrites it.
    pub fn save(&self, document: &Value) -> SeatResult<SavedSnapshot> {
        fs::create_dir_all(&self.dir)?;

        let id = snapshot_id(self.clock.now());
        let path = self.dir.join(format!("{id}{SNAPSHOT_EXTENSION}"));
        let body = serde_json::to_string_pretty(document)?;
        fs::write(&path, body)?;

        info!("Saved snapshot {id} to {}", path.display());
        Ok(SavedSnapshot { id, path })
    }

    /// Every snapshot, newest first. One unreadable file fails the call.
    pub fn list_all(&self) -> SeatResult<Vec<Value>> {
        let names = self.sorted_file_names()?;
        debug!("Listing {} snapshots from {}", names.len(), self.dir.display());
        names.iter().map(|name| self.read_snapshot(name)).collect()
    }

    /// The `n` newest snapshots, newest first.
    pub fn list_recent(&self, n: usize) -> SeatResult<Vec<Value>> {
        let names = self.sorted_file_names()?;
        debug!("Listing {} of {} snapshots", n.min(names.len()), names.len());
        names
            .iter()
            .take(n)
            .map(|name| self.read_snapshot(name))
            .collect()
    }

    /// Identifiers of all snapshots, newest first.
    pub fn snapshot_ids(&self) -> SeatResult<Vec<SnapshotId>> {
        Ok(self
            .sorted_file_names()?
            .into_iter()
            .filter_map(|name| name.strip_suffix(SNAPSHOT_EXTENSION).map(str::to_owned))
            .collect())
    }

    /// Snapshot file names in descending order.
    fn sorted_file_names(&self) -> SeatResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // Removed behind our back: nothing saved yet as far as we know.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(SNAPSHOT_EXTENSION) {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    fn read_snapshot(&self, name: &str) -> SeatResult<Value> {
        let path = self.dir.join(name);
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| SeatError::CorruptSnapshot { path, source })
    }
}
