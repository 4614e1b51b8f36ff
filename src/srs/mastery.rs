//! Mastery scores derived from scheduling state.
//!
//! A card's score blends three signals, each normalized to [0, 1]:
//! - interval: how far out the next review is, saturating at one year (40%)
//! - ease: the ease factor relative to the starting ease of 2.5 (30%)
//! - repetitions: consecutive successes, saturating at 10 (30%)
//!
//! The ease component is capped at its nominal 30% share. Ease factors grow
//! without bound after repeated easy answers, and an uncapped component would
//! push card scores past 100.

use crate::config::{
  MASTERY_EASE_WEIGHT, MASTERY_INTERVAL_WEIGHT, MASTERY_MAX_EASE_FACTOR,
  MASTERY_MAX_INTERVAL_DAYS, MASTERY_MAX_REPETITIONS, MASTERY_REPETITIONS_WEIGHT,
};
use crate::domain::{Card, SchedulingState};

/// Score a single card's scheduling state, 0..=100.
pub fn card_mastery(state: &SchedulingState) -> u8 {
  let interval = (state.interval as f64 / MASTERY_MAX_INTERVAL_DAYS).min(1.0) * MASTERY_INTERVAL_WEIGHT;
  let ease = ((state.ease_factor / MASTERY_MAX_EASE_FACTOR) * MASTERY_EASE_WEIGHT).min(MASTERY_EASE_WEIGHT);
  let repetitions =
    (state.repetitions as f64 / MASTERY_MAX_REPETITIONS).min(1.0) * MASTERY_REPETITIONS_WEIGHT;

  ((interval + ease + repetitions) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Mean card mastery across a deck, rounded. An empty deck scores 0.
pub fn deck_mastery(cards: &[Card]) -> u8 {
  if cards.is_empty() {
    return 0;
  }

  let total: u32 = cards.iter().map(|c| card_mastery(&c.schedule) as u32).sum();
  (total as f64 / cards.len() as f64).round() as u8
}
