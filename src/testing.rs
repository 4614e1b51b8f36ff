//! Test utilities for database setup.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::db::SqliteStore;
use crate::error::Result;

/// Test environment with a file-backed deck database in a temporary directory.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
  /// Temporary directory (kept alive for database file persistence)
  pub temp: TempDir,
  /// Store opened on `decks.db` inside `temp`, migrations applied
  pub store: SqliteStore,
}

impl TestEnv {
  pub fn new() -> Result<Self> {
    let temp = TempDir::new()?;
    let store = SqliteStore::open(&temp.path().join("decks.db"))?;
    Ok(Self { temp, store })
  }

  /// Get the temporary directory path for creating test files.
  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn db_path(&self) -> PathBuf {
    self.temp.path().join("decks.db")
  }
}
