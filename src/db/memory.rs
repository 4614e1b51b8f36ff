//! In-memory deck store for embedding and tests.

use std::sync::Mutex;

use crate::db::DeckStore;
use crate::domain::{Deck, DeckId};
use crate::error::{Error, Result};

/// Decks kept in insertion order behind a mutex
#[derive(Debug, Default)]
pub struct MemoryStore {
  decks: Mutex<Vec<Deck>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_decks(decks: Vec<Deck>) -> Self {
    Self {
      decks: Mutex::new(decks),
    }
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Deck>>> {
    self.decks.lock().map_err(|_| Error::LockPoisoned)
  }
}

impl DeckStore for MemoryStore {
  fn list_decks(&self) -> Result<Vec<Deck>> {
    Ok(self.lock()?.clone())
  }

  fn load_deck(&self, id: &DeckId) -> Result<Option<Deck>> {
    Ok(self.lock()?.iter().find(|d| &d.id == id).cloned())
  }

  fn save_deck(&self, deck: &Deck) -> Result<()> {
    let mut decks = self.lock()?;
    match decks.iter_mut().find(|d| d.id == deck.id) {
      Some(existing) => *existing = deck.clone(),
      None => decks.push(deck.clone()),
    }
    Ok(())
  }
}
