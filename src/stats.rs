//! Deck overview figures for dashboards and the report binary.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{Deck, DeckId};
use crate::srs;

/// When a deck next needs attention, at day granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum ReviewDay {
  /// Due today, or overdue
  Today,
  Tomorrow,
  On(NaiveDate),
}

impl ReviewDay {
  pub fn from_timestamp(next_review: DateTime<Utc>, now: DateTime<Utc>) -> Self {
    let today = now.date_naive();
    let day = next_review.date_naive();
    if day <= today {
      Self::Today
    } else if day == today + Duration::days(1) {
      Self::Tomorrow
    } else {
      Self::On(day)
    }
  }

  pub fn label(&self) -> String {
    match self {
      Self::Today => "today".to_string(),
      Self::Tomorrow => "tomorrow".to_string(),
      Self::On(date) => date.format("%Y-%m-%d").to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSummary {
  pub id: DeckId,
  pub title: String,
  pub total_cards: usize,
  pub due_now: usize,
  pub mastery_level: u8,
  pub wrong_cards: usize,
  /// None for a deck with no cards
  pub next_review: Option<ReviewDay>,
  pub last_studied: DateTime<Utc>,
}

impl DeckSummary {
  pub fn from_deck(deck: &Deck, now: DateTime<Utc>) -> Self {
    Self {
      id: deck.id.clone(),
      title: deck.title.clone(),
      total_cards: deck.total_cards(),
      due_now: srs::due_cards(&deck.cards, now).len(),
      mastery_level: srs::deck_mastery(&deck.cards),
      wrong_cards: deck.wrong_cards.len(),
      next_review: srs::next_due(&deck.cards).map(|ts| ReviewDay::from_timestamp(ts, now)),
      last_studied: deck.last_studied,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
  pub total_cards: usize,
  pub total_wrong_cards: usize,
  /// Rounded mean of deck mastery levels, 0 with no decks
  pub average_mastery: u8,
  pub last_studied: Option<DateTime<Utc>>,
  pub decks: Vec<DeckSummary>,
}

pub fn overview(decks: &[Deck], now: DateTime<Utc>) -> Overview {
  let summaries: Vec<DeckSummary> = decks.iter().map(|d| DeckSummary::from_deck(d, now)).collect();

  let average_mastery = if summaries.is_empty() {
    0
  } else {
    let total: u32 = summaries.iter().map(|s| s.mastery_level as u32).sum();
    (total as f64 / summaries.len() as f64).round() as u8
  };

  Overview {
    total_cards: summaries.iter().map(|s| s.total_cards).sum(),
    total_wrong_cards: summaries.iter().map(|s| s.wrong_cards).sum(),
    average_mastery,
    last_studied: summaries.iter().map(|s| s.last_studied).max(),
    decks: summaries,
  }
}
