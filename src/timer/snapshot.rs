//! Durable write-ahead record for the active session.
//!
//! A single JSON file under the data directory holds the current session
//! together with its sync status. The record is rewritten at every local
//! checkpoint and replayed on startup, so a crash between two remote writes
//! loses at most the last checkpoint interval.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::FocusSession;

const RECORD_FILE: &str = "active_session.json";

/// Whether the backing store has confirmed the record's spent time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    /// The store holds exactly this progress.
    Synced,
    /// Local progress is ahead of the store; the next checkpoint will catch
    /// it up.
    Pending,
    /// A write to the store failed; replay on the next load.
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session: FocusSession,
    pub paused: bool,
    pub sync: SyncStatus,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(session: FocusSession, paused: bool, sync: SyncStatus) -> Self {
        Self {
            session,
            paused,
            sync,
            updated_at: Utc::now(),
        }
    }
}

/// File-backed store for the single [`SessionRecord`].
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = data_dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self {
            path: dir.join(RECORD_FILE),
        })
    }

    pub fn write(&self, record: &SessionRecord) -> Result<()> {
        let serialized = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write snapshot to {}", self.path.display()))
    }

    /// Read the record if one exists. A record that fails to deserialize is
    /// deleted and reported as absent; corruption must never take the timer
    /// down.
    pub fn read(&self) -> Option<SessionRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return None,
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "Discarding corrupt session snapshot at {}: {err}",
                    self.path.display()
                );
                if let Err(remove_err) = fs::remove_file(&self.path) {
                    warn!("Failed to remove corrupt snapshot: {remove_err}");
                }
                None
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to clear snapshot at {}", self.path.display())),
        }
    }
}
