//! Multi-round study session with weakest-first re-study.
//!
//! The first round presents every card once in shuffled order. Cards answered
//! wrong are collected and presented again in the next round, ordered by a
//! transient session score (+1 per correct answer, -1 per miss) so the cards
//! the learner struggles with most come first. Sessions stop when a round
//! ends with no misses or after `SESSION_MAX_ROUNDS` rounds.
//!
//! Session scores never touch the card's scheduling state.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, VecDeque};

use crate::config;
use crate::domain::{CardId, Quality};

#[derive(Debug, Clone)]
pub struct StudySession {
  queue: VecDeque<CardId>,
  /// 1-based; 0 before the first card is drawn
  round: u32,
  max_rounds: u32,
  /// Misses collected during the current round, in first-miss order
  misses: Vec<CardId>,
  scores: HashMap<CardId, i32>,
  /// Every card missed at least once, in first-miss order
  missed_ever: Vec<CardId>,
  last_correct: HashMap<CardId, bool>,
  /// Card handed out by `next_card` and not yet recorded
  pending: Option<CardId>,
  correct: u32,
  incorrect: u32,
  started: bool,
}

impl StudySession {
  /// Start a session over `cards`, shuffled with the thread-local RNG.
  pub fn new(cards: Vec<CardId>) -> Self {
    Self::with_rng(cards, &mut rand::rng())
  }

  pub fn with_rng<R: Rng + ?Sized>(mut cards: Vec<CardId>, rng: &mut R) -> Self {
    cards.shuffle(rng);
    Self {
      queue: cards.into(),
      round: 0,
      max_rounds: config::SESSION_MAX_ROUNDS,
      misses: Vec::new(),
      scores: HashMap::new(),
      missed_ever: Vec::new(),
      last_correct: HashMap::new(),
      pending: None,
      correct: 0,
      incorrect: 0,
      started: false,
    }
  }

  /// Override the round limit. A limit of 0 is treated as 1.
  pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
    self.max_rounds = max_rounds.max(1);
    self
  }

  /// Next card to present, or None when the session is over.
  pub fn next_card(&mut self) -> Option<CardId> {
    if !self.started {
      self.started = true;
      self.round = 1;
    }
    if self.queue.is_empty() && !self.start_next_round() {
      return None;
    }
    self.pending = self.queue.pop_front();
    self.pending.clone()
  }

  /// Record the answer for a presented card.
  pub fn record(&mut self, card_id: &CardId, quality: Quality) {
    let correct = quality.is_success();
    if self.pending.as_ref() == Some(card_id) {
      self.pending = None;
    }
    *self.scores.entry(card_id.clone()).or_insert(0) += if correct { 1 } else { -1 };
    self.last_correct.insert(card_id.clone(), correct);

    if correct {
      self.correct += 1;
    } else {
      self.incorrect += 1;
      if !self.misses.contains(card_id) {
        self.misses.push(card_id.clone());
      }
      if !self.missed_ever.contains(card_id) {
        self.missed_ever.push(card_id.clone());
      }
    }
  }

  fn start_next_round(&mut self) -> bool {
    if self.misses.is_empty() || self.round >= self.max_rounds {
      return false;
    }

    let mut next = std::mem::take(&mut self.misses);
    // Stable sort keeps first-miss order among equal scores
    next.sort_by_key(|id| self.scores.get(id).copied().unwrap_or(0));
    tracing::debug!(round = self.round + 1, cards = next.len(), "starting re-study round");

    self.queue = next.into();
    self.round += 1;
    true
  }

  /// True once no card is left to draw and the last drawn card has been
  /// recorded.
  pub fn is_finished(&self) -> bool {
    self.started
      && self.pending.is_none()
      && self.queue.is_empty()
      && (self.misses.is_empty() || self.round >= self.max_rounds)
  }

  pub fn round(&self) -> u32 {
    self.round
  }

  pub fn remaining_in_round(&self) -> usize {
    self.queue.len()
  }

  pub fn correct(&self) -> u32 {
    self.correct
  }

  pub fn incorrect(&self) -> u32 {
    self.incorrect
  }

  /// Percentage of answers that were correct, rounded. 0 before any answer.
  pub fn accuracy(&self) -> u8 {
    let answered = self.correct + self.incorrect;
    if answered == 0 {
      return 0;
    }
    ((self.correct as f64 / answered as f64) * 100.0).round() as u8
  }

  pub fn session_score(&self, card_id: &CardId) -> i32 {
    self.scores.get(card_id).copied().unwrap_or(0)
  }

  /// Cards whose most recent answer in this session was wrong, in first-miss order
  pub fn wrong_cards(&self) -> Vec<CardId> {
    self
      .missed_ever
      .iter()
      .filter(|id| self.last_correct.get(*id) == Some(&false))
      .cloned()
      .collect()
  }
}
