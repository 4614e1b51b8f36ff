pub mod decks;
pub mod memory;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Deck, DeckId};
use crate::error::{Error, Result};

pub use memory::MemoryStore;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Persistence capability the review service needs: get and set whole decks.
///
/// Implementations serialize access internally; callers must still ensure a
/// single writer per card across a load, update, save cycle.
pub trait DeckStore {
  fn list_decks(&self) -> Result<Vec<Deck>>;
  fn load_deck(&self, id: &DeckId) -> Result<Option<Deck>>;
  fn save_deck(&self, deck: &Deck) -> Result<()>;
}

impl<S: DeckStore + ?Sized> DeckStore for Arc<S> {
  fn list_decks(&self) -> Result<Vec<Deck>> {
    (**self).list_decks()
  }

  fn load_deck(&self, id: &DeckId) -> Result<Option<Deck>> {
    (**self).load_deck(id)
  }

  fn save_deck(&self, deck: &Deck) -> Result<()> {
    (**self).save_deck(deck)
  }
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> Result<MutexGuard<'_, Connection>> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    Error::LockPoisoned
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      if let Err(e) = std::fs::create_dir_all(parent) {
        tracing::warn!("Could not create database directory {}: {}", parent.display(), e);
      }
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// SQLite-backed deck store
#[derive(Clone)]
pub struct SqliteStore {
  pool: DbPool,
}

impl SqliteStore {
  pub fn open(path: &Path) -> Result<Self> {
    let pool = init_db(path)?;
    tracing::debug!("Opened deck database at {}", path.display());
    Ok(Self { pool })
  }

  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(Self {
      pool: Arc::new(Mutex::new(conn)),
    })
  }
}

impl DeckStore for SqliteStore {
  fn list_decks(&self) -> Result<Vec<Deck>> {
    let conn = try_lock(&self.pool)?;
    Ok(decks::get_all_decks(&conn)?)
  }

  fn load_deck(&self, id: &DeckId) -> Result<Option<Deck>> {
    let conn = try_lock(&self.pool)?;
    Ok(decks::get_deck(&conn, id)?)
  }

  fn save_deck(&self, deck: &Deck) -> Result<()> {
    let conn = try_lock(&self.pool)?;
    decks::save_deck(&conn, deck)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_sqlite_store_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    let deck = Deck::new(
      "History".to_string(),
      String::new(),
      vec![("1789".to_string(), "French Revolution".to_string())],
    );

    store.save_deck(&deck).unwrap();

    assert_eq!(store.load_deck(&deck.id).unwrap(), Some(deck.clone()));
    assert_eq!(store.list_decks().unwrap(), vec![deck]);
  }

  #[test]
  fn test_init_db_creates_parent_directory() {
    let env = TestEnv::new().unwrap();
    let path = env.path().join("nested/dir/decks.db");

    let store = SqliteStore::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.list_decks().unwrap().is_empty());
  }

  #[test]
  fn test_file_store_persists_across_opens() {
    let env = TestEnv::new().unwrap();
    let deck = Deck::new("Latin".to_string(), String::new(), Vec::new());
    env.store.save_deck(&deck).unwrap();

    let reopened = SqliteStore::open(&env.db_path()).unwrap();
    assert_eq!(reopened.load_deck(&deck.id).unwrap(), Some(deck));
  }

  #[test]
  fn test_arc_store_delegates() {
    let store: Arc<dyn DeckStore> = Arc::new(MemoryStore::new());
    let deck = Deck::new("Shared".to_string(), String::new(), Vec::new());
    store.save_deck(&deck).unwrap();
    assert_eq!(store.list_decks().unwrap().len(), 1);
  }
}
