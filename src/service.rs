//! Review orchestration over a deck store.
//!
//! Each operation loads the deck, applies the pure scheduling and mastery
//! functions, and saves the deck back. The store serializes individual calls;
//! callers are expected to have a single writer per card.

use chrono::{DateTime, Utc};

use crate::db::DeckStore;
use crate::domain::{Card, CardId, Deck, DeckId, Quality, ReviewEvent};
use crate::error::{Error, Result};
use crate::srs;
use crate::stats::{self, Overview};

pub struct StudyService<S> {
  store: S,
}

impl<S: DeckStore> StudyService<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  fn deck(&self, deck_id: &DeckId) -> Result<Deck> {
    self
      .store
      .load_deck(deck_id)?
      .ok_or_else(|| Error::DeckNotFound(deck_id.clone()))
  }

  /// Apply a review to a card now. Returns the updated card.
  pub fn record_review(&self, deck_id: &DeckId, card_id: &CardId, quality: Quality) -> Result<Card> {
    self.record_review_at(deck_id, card_id, quality, Utc::now())
  }

  pub fn record_review_at(
    &self,
    deck_id: &DeckId,
    card_id: &CardId,
    quality: Quality,
    now: DateTime<Utc>,
  ) -> Result<Card> {
    let mut deck = self.deck(deck_id)?;

    let card = deck.card_mut(card_id).ok_or_else(|| Error::CardNotFound {
      deck: deck_id.clone(),
      card: card_id.clone(),
    })?;
    card.schedule = srs::advance_at(&card.schedule, quality, now);
    let updated = card.clone();

    // Mastery must reflect the card state just written
    let mastery = deck.recompute_mastery();
    self.store.save_deck(&deck)?;

    tracing::debug!(
      deck = %deck_id,
      card = %card_id,
      quality = quality.value(),
      interval = updated.schedule.interval,
      ease = updated.schedule.ease_factor,
      mastery,
      "recorded review"
    );
    Ok(updated)
  }

  pub fn apply_event(&self, deck_id: &DeckId, event: &ReviewEvent, now: DateTime<Utc>) -> Result<Card> {
    self.record_review_at(deck_id, &event.card_id, event.quality, now)
  }

  /// Same as `record_review`, taking a raw score that is validated first.
  pub fn record_review_score(&self, deck_id: &DeckId, card_id: &CardId, score: u8) -> Result<Card> {
    let quality = Quality::new(score)?;
    self.record_review(deck_id, card_id, quality)
  }

  /// Cards of a deck that are due at `now`, in deck order.
  pub fn due_cards(&self, deck_id: &DeckId, now: DateTime<Utc>) -> Result<Vec<Card>> {
    let deck = self.deck(deck_id)?;
    Ok(srs::due_cards(&deck.cards, now).into_iter().cloned().collect())
  }

  /// Close out a study session: stamp the study time, refresh mastery and
  /// remember which cards were still wrong.
  pub fn finish_session(
    &self,
    deck_id: &DeckId,
    wrong_cards: Vec<CardId>,
    now: DateTime<Utc>,
  ) -> Result<Deck> {
    let mut deck = self.deck(deck_id)?;
    deck.last_studied = now;
    deck.set_wrong_cards(wrong_cards);
    deck.recompute_mastery();
    self.store.save_deck(&deck)?;

    tracing::info!(
      deck = %deck_id,
      wrong = deck.wrong_cards.len(),
      mastery = deck.mastery_level,
      "study session finished"
    );
    Ok(deck)
  }

  pub fn overview(&self, now: DateTime<Utc>) -> Result<Overview> {
    let decks = self.store.list_decks()?;
    Ok(stats::overview(&decks, now))
  }
}
