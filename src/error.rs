//! Crate-wide error type.

use thiserror::Error;

use crate::domain::{CardId, DeckId};

#[derive(Debug, Error)]
pub enum Error {
  /// Quality score outside 1..=5. Rejected before it reaches the scheduler.
  #[error("invalid review quality {0}: expected a value between 1 and 5")]
  InvalidQuality(u8),

  #[error("deck {0} not found")]
  DeckNotFound(DeckId),

  #[error("card {card} not found in deck {deck}")]
  CardNotFound { deck: DeckId, card: CardId },

  #[error("storage error: {0}")]
  Storage(#[from] rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("store unavailable: lock poisoned")]
  LockPoisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
