//! Durable session pointer
//!
//! Persists the identifier of the current session across process restarts
//! in an embedded `sled` key-value database: one fixed key, one value.
//! Absence of the key means there is no session to restore.

use crate::error::{NewschatError, Result};
use directories::ProjectDirs;
use sled::Db;
use std::path::{Path, PathBuf};

/// Fixed key under which the current session id is stored
const SESSION_POINTER_KEY: &str = "chatbot_session_id";

/// Durable pointer to the current session
///
/// Only `create_session`, `restore_session`, and `delete_history` write
/// through this; writes are last-write-wins. Cloning shares the underlying
/// database handle.
#[derive(Clone)]
pub struct SessionPointer {
    db: Db,
}

impl SessionPointer {
    /// Open the pointer database at its default location
    ///
    /// The `NEWSCHAT_STATE_DB` environment variable overrides the path,
    /// which makes it easy to point the binary at a test database without
    /// touching the user's application data dir.
    ///
    /// # Errors
    ///
    /// Returns `NewschatError::Storage` if the database cannot be opened
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("NEWSCHAT_STATE_DB") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("io", "newschat", "newschat")
            .ok_or_else(|| NewschatError::Storage("Could not determine data directory".into()))?;

        let db_path = proj_dirs.data_dir().join("state.db");
        Self::new_with_path(db_path)
    }

    /// Open the pointer database at an explicit path
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use newschat::storage::SessionPointer;
    ///
    /// let pointer = SessionPointer::new_with_path("/tmp/newschat-state.db").unwrap();
    /// assert!(pointer.load().unwrap().is_none());
    /// ```
    pub fn new_with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let db = sled::open(&path)
            .map_err(|e| NewschatError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// Read the stored session id, if any
    ///
    /// # Errors
    ///
    /// Returns `NewschatError::Storage` if the read fails or the stored
    /// value is not valid UTF-8
    pub fn load(&self) -> Result<Option<String>> {
        match self
            .db
            .get(SESSION_POINTER_KEY)
            .map_err(|e| NewschatError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let session_id = String::from_utf8(bytes.to_vec())
                    .map_err(|e| NewschatError::Storage(format!("Corrupt pointer value: {}", e)))?;
                Ok(Some(session_id))
            }
            None => Ok(None),
        }
    }

    /// Persist a session id (last write wins)
    ///
    /// # Errors
    ///
    /// Returns `NewschatError::Storage` if insertion or flushing fails
    pub fn store(&self, session_id: &str) -> Result<()> {
        self.db
            .insert(SESSION_POINTER_KEY, session_id.as_bytes())
            .map_err(|e| NewschatError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| NewschatError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    /// Remove the stored session id; idempotent
    ///
    /// # Errors
    ///
    /// Returns `NewschatError::Storage` if removal or flushing fails
    pub fn clear(&self) -> Result<()> {
        self.db
            .remove(SESSION_POINTER_KEY)
            .map_err(|e| NewschatError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| NewschatError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        NewschatError::Storage(format!("Failed to create data directory: {}", e)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn create_test_pointer() -> (SessionPointer, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let pointer =
            SessionPointer::new_with_path(dir.path().join("state.db")).expect("open failed");
        (pointer, dir)
    }

    #[test]
    fn test_load_returns_none_when_unset() {
        let (pointer, _dir) = create_test_pointer();
        assert!(pointer.load().expect("load failed").is_none());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let (pointer, _dir) = create_test_pointer();
        pointer.store("abc123").expect("store failed");
        assert_eq!(pointer.load().expect("load failed").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_store_is_last_write_wins() {
        let (pointer, _dir) = create_test_pointer();
        pointer.store("first").expect("store failed");
        pointer.store("second").expect("store failed");
        assert_eq!(pointer.load().expect("load failed").as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_removes_pointer_and_is_idempotent() {
        let (pointer, _dir) = create_test_pointer();
        pointer.store("abc123").expect("store failed");

        pointer.clear().expect("first clear failed");
        assert!(pointer.load().expect("load failed").is_none());

        pointer.clear().expect("second clear failed");
        assert!(pointer.load().expect("load failed").is_none());
    }

    #[test]
    fn test_pointer_survives_reopen() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("state.db");

        {
            let pointer = SessionPointer::new_with_path(&path).expect("open failed");
            pointer.store("abc123").expect("store failed");
        }

        let reopened = SessionPointer::new_with_path(&path).expect("reopen failed");
        assert_eq!(
            reopened.load().expect("load failed").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    #[serial]
    fn test_new_respects_env_override() {
        let dir = tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("nested").join("state.db");
        std::env::set_var("NEWSCHAT_STATE_DB", db_path.to_string_lossy().to_string());

        let pointer = SessionPointer::new().expect("new failed with env override");
        pointer.store("env-session").expect("store failed");
        assert!(db_path.parent().unwrap().exists());

        std::env::remove_var("NEWSCHAT_STATE_DB");
    }
}
