use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Card, CardId};
use crate::srs::mastery;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(pub String);

impl DeckId {
  pub fn new() -> Self {
    Self(super::generate_id())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for DeckId {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Display for DeckId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for DeckId {
  fn from(s: &str) -> Self {
    Self(s.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
  pub id: DeckId,
  pub title: String,
  pub description: String,
  pub cards: Vec<Card>,
  /// Derived from card states; refreshed by `recompute_mastery`
  pub mastery_level: u8,
  pub last_studied: DateTime<Utc>,
  /// Cards missed in the most recent study session
  pub wrong_cards: Vec<CardId>,
}

impl Deck {
  /// Build a deck whose cards all start with fresh scheduling fields.
  pub fn new(title: String, description: String, cards: Vec<(String, String)>) -> Self {
    Self::new_at(title, description, cards, Utc::now())
  }

  pub fn new_at(
    title: String,
    description: String,
    cards: Vec<(String, String)>,
    now: DateTime<Utc>,
  ) -> Self {
    let cards = cards
      .into_iter()
      .map(|(front, back)| Card::new_at(front, back, now))
      .collect();

    let mut deck = Self {
      id: DeckId::new(),
      title,
      description,
      cards,
      mastery_level: 0,
      last_studied: now,
      wrong_cards: Vec::new(),
    };
    deck.recompute_mastery();
    deck
  }

  pub fn total_cards(&self) -> usize {
    self.cards.len()
  }

  pub fn card(&self, id: &CardId) -> Option<&Card> {
    self.cards.iter().find(|c| &c.id == id)
  }

  pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
    self.cards.iter_mut().find(|c| &c.id == id)
  }

  /// Refresh `mastery_level` from the current card states and return it.
  pub fn recompute_mastery(&mut self) -> u8 {
    self.mastery_level = mastery::deck_mastery(&self.cards);
    self.mastery_level
  }

  /// Replace the wrong-card list, keeping only ids that belong to this deck.
  pub fn set_wrong_cards(&mut self, wrong: Vec<CardId>) {
    let mut kept: Vec<CardId> = Vec::with_capacity(wrong.len());
    for id in wrong {
      if self.card(&id).is_some() && !kept.contains(&id) {
        kept.push(id);
      }
    }
    self.wrong_cards = kept;
  }
}
