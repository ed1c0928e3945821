//! Durable append-only store for conversion history.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::HistoryError;

use super::HistoryEntry;

/// Default number of entries returned by a query.
pub const DEFAULT_QUERY_LIMIT: usize = 5;

/// Owns the append-only log and its JSON file mirror.
///
/// Appends are serialized: the mutex covers the whole read-modify-write
/// cycle so concurrent callers cannot lose updates to the persisted state.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Open the store at `path`, loading any existing log.
    ///
    /// A missing file starts an empty log; a present but undecodable file is
    /// an error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<Vec<HistoryEntry>>(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "History loaded");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Append an entry and persist the log before returning.
    pub fn add(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock();
        entries.push(entry);
        persist(&self.path, &entries)?;
        info!(
            path = %self.path.display(),
            entries = entries.len(),
            "Conversion recorded"
        );
        Ok(())
    }

    /// Entries filtered by bookmaker, newest first, truncated to `limit`.
    ///
    /// The bookmaker filter is an exact, case-insensitive match against the
    /// stored name (canonical id or raw pass-through).
    pub fn query(&self, bookmaker: Option<&str>, limit: usize) -> Vec<HistoryEntry> {
        let entries = self.entries.lock();
        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|entry| match bookmaker {
                Some(name) => entry
                    .bookmaker
                    .as_deref()
                    .is_some_and(|b| b.eq_ignore_ascii_case(name)),
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(limit);
        matched
    }

    /// Snapshot of the full log in append order.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Rewrite the full log through a temp file and atomic rename.
fn persist(path: &Path, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
    let json = serde_json::to_string_pretty(entries)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
