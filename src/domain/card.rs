use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
  pub fn new() -> Self {
    Self(super::generate_id())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for CardId {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Display for CardId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for CardId {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

/// The four fields the scheduler owns. Storage must round-trip these exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
  /// Days until the next review
  pub interval: i64,
  pub ease_factor: f64,
  /// Consecutive successful reviews
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

impl SchedulingState {
  /// Scheduling fields of a card that has never been reviewed: due immediately.
  pub fn fresh(now: DateTime<Utc>) -> Self {
    Self {
      interval: 0,
      ease_factor: config::DEFAULT_EASE_FACTOR,
      repetitions: 0,
      next_review: now,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review <= now
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id: CardId,
  pub front: String,
  pub back: String,
  #[serde(flatten)]
  pub schedule: SchedulingState,
}

impl Card {
  pub fn new(front: String, back: String) -> Self {
    Self::new_at(front, back, Utc::now())
  }

  pub fn new_at(front: String, back: String, now: DateTime<Utc>) -> Self {
    Self {
      id: CardId::new(),
      front,
      back,
      schedule: SchedulingState::fresh(now),
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.schedule.is_due(now)
  }
}
