use chrono::{DateTime, Utc};

use crate::domain::Card;

/// Cards whose next review is at or before `now`, in deck order.
///
/// An empty result means nothing is scheduled yet; callers decide whether to
/// fall back to browsing the whole deck.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
  cards.iter().filter(|c| c.is_due(now)).collect()
}

/// Earliest scheduled review in a deck, or None for an empty deck
pub fn next_due(cards: &[Card]) -> Option<DateTime<Utc>> {
  cards.iter().map(|c| c.schedule.next_review).min()
}
