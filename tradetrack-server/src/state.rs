use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tradetrack_core::{InMemoryDirectory, InMemoryTimeEntryStore, MatchConfig};

/// Holds the shared state accessible by all request handlers.
///
/// Both stores synchronize internally, so handlers share them through plain
/// `Arc`s without an outer lock. `save_lock` serializes snapshot writes.
#[derive(Clone, Debug)]
pub struct AppState {
    pub data_path: PathBuf,
    pub directory: Arc<InMemoryDirectory>,
    pub time_entries: Arc<InMemoryTimeEntryStore>,
    pub matching: MatchConfig,
    pub save_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates empty application state.
    pub fn new(data_path: PathBuf, matching: MatchConfig) -> Self {
        Self::with_stores(data_path, matching, InMemoryDirectory::new(), InMemoryTimeEntryStore::new())
    }

    pub fn with_stores(
        data_path: PathBuf,
        matching: MatchConfig,
        directory: InMemoryDirectory,
        time_entries: InMemoryTimeEntryStore,
    ) -> Self {
        AppState {
            data_path,
            directory: Arc::new(directory),
            time_entries: Arc::new(time_entries),
            matching,
            save_lock: Arc::new(Mutex::new(())),
        }
    }
}
