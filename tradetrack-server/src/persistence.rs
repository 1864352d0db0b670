//! JSON snapshots of the in-memory stores.
//!
//! `employees.json` and `time_entries.json` live directly under the data
//! path. Each file is written to a `.tmp` sibling first and then renamed over
//! the previous snapshot.

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tradetrack_core::{CoreError, CoreResult, Employee, InMemoryDirectory, InMemoryTimeEntryStore, MatchConfig, TimeEntry};

pub const EMPLOYEES_FILE: &str = "employees.json";
pub const TIME_ENTRIES_FILE: &str = "time_entries.json";

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    let tmp_path = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| CoreError::StoreFailure(format!("Failed to serialize {:?}: {}", path, e)))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    debug!(file_path = ?path, "Snapshot file written");
    Ok(())
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> CoreResult<T> {
    if !path.exists() {
        debug!(file_path = ?path, "No snapshot file, starting empty");
        return Ok(T::default());
    }
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CoreError::StoreFailure(format!("Failed to parse {:?}: {}", path, e)))
}

fn file_in(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Writes both stores under `persistence_path`, creating it if needed.
pub fn save_snapshot(app_state: &AppState, persistence_path: &Path) -> CoreResult<()> {
    fs::create_dir_all(persistence_path)?;

    let employees = app_state.directory.snapshot();
    write_json_atomic(&file_in(persistence_path, EMPLOYEES_FILE), &employees)?;

    let entries = app_state.time_entries.snapshot();
    write_json_atomic(&file_in(persistence_path, TIME_ENTRIES_FILE), &entries)?;

    info!(
        path = ?persistence_path,
        employees = employees.len(),
        time_entries = entries.len(),
        "Snapshot saved"
    );
    Ok(())
}

/// Writes a snapshot of `app_state` to its data path once a mutation has
/// been applied, so acknowledged writes survive a crash.
pub async fn save_after_write(app_state: &AppState) -> ServerResult<()> {
    let _guard = app_state.save_lock.lock().await;
    save_snapshot(app_state, &app_state.data_path)
        .map_err(|e| ServerError::Internal(format!("Failed to persist snapshot: {}", e)))
}

/// Restores application state from `persistence_path`. Missing files mean an
/// empty store; unreadable or inconsistent files are a `StoreFailure`.
pub fn load_snapshot(persistence_path: &Path, matching: MatchConfig) -> CoreResult<AppState> {
    let employees: Vec<Employee> = read_json(&file_in(persistence_path, EMPLOYEES_FILE))?;
    let entries: Vec<TimeEntry> = read_json(&file_in(persistence_path, TIME_ENTRIES_FILE))?;

    let mismatched = employees
        .iter()
        .filter(|e| e.embedding.len() != matching.embedding_dimension)
        .count();
    if mismatched > 0 {
        // Left in place; matching reports these as Misconfigured.
        warn!(
            mismatched,
            expected = matching.embedding_dimension,
            "Stored embeddings do not match the configured dimension"
        );
    }

    info!(
        path = ?persistence_path,
        employees = employees.len(),
        time_entries = entries.len(),
        "Snapshot loaded"
    );
    Ok(AppState::with_stores(
        persistence_path.to_path_buf(),
        matching,
        InMemoryDirectory::from_employees(employees)?,
        InMemoryTimeEntryStore::from_entries(entries)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tradetrack_core::clock::{clock_in, clock_out};
    use tradetrack_core::registration::register_employee;
    use tradetrack_core::{Embedding, EmployeeDirectory, NewEmployee, Role, TimeEntryStore};

    fn matching() -> MatchConfig {
        MatchConfig::new(3, 0.5)
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempdir().unwrap();
        let state = load_snapshot(dir.path(), matching()).unwrap();
        assert!(state.directory.is_empty());
        assert!(state.time_entries.snapshot().is_empty());
        assert_eq!(state.data_path, dir.path());
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("nested");
        let state = AppState::new(data_path.clone(), matching());

        register_employee(
            state.directory.as_ref(),
            NewEmployee {
                employee_id: "E1".to_string(),
                name: "Ada".to_string(),
                embedding: Embedding::from(vec![0.0, 3.0, 4.0]),
                role: Some(Role::Admin),
            },
            &state.matching,
        )
        .unwrap();
        clock_in(state.time_entries.as_ref(), "E1").unwrap();
        clock_out(state.time_entries.as_ref(), "E1").unwrap();
        clock_in(state.time_entries.as_ref(), "E1").unwrap();

        save_snapshot(&state, &data_path).unwrap();
        assert!(data_path.join(EMPLOYEES_FILE).exists());
        assert!(!data_path.join("employees.json.tmp").exists());

        let restored = load_snapshot(&data_path, matching()).unwrap();
        assert_eq!(restored.directory.get_by_id("E1").unwrap(), state.directory.get_by_id("E1").unwrap());
        assert_eq!(restored.time_entries.snapshot(), state.time_entries.snapshot());
        assert!(restored.time_entries.get_open_entry("E1").unwrap().is_some());

        // Ids continue after the restored entries.
        clock_out(restored.time_entries.as_ref(), "E1").unwrap();
        assert_eq!(clock_in(restored.time_entries.as_ref(), "E1").unwrap().id, 3);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), matching());
        save_snapshot(&state, dir.path()).unwrap();

        clock_in(state.time_entries.as_ref(), "E1").unwrap();
        save_snapshot(&state, dir.path()).unwrap();
        let restored = load_snapshot(dir.path(), matching()).unwrap();
        assert_eq!(restored.time_entries.snapshot().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_store_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EMPLOYEES_FILE), b"{not json").unwrap();
        assert!(matches!(load_snapshot(dir.path(), matching()), Err(CoreError::StoreFailure(_))));
    }
}
