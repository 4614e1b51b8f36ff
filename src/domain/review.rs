use serde::{Deserialize, Serialize};

use crate::domain::CardId;
use crate::error::{Error, Result};

/// Lowest and highest accepted quality scores
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 5;

/// Scores at or above this count as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Self-assessed recall quality on the 1-5 scale.
///
/// Construction validates the range, so every `Quality` the scheduler sees is
/// well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
  pub fn new(value: u8) -> Result<Self> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&value) {
      Ok(Self(value))
    } else {
      Err(Error::InvalidQuality(value))
    }
  }

  pub fn value(self) -> u8 {
    self.0
  }

  pub fn is_success(self) -> bool {
    self.0 >= PASSING_QUALITY
  }
}

impl TryFrom<u8> for Quality {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self> {
    Self::new(value)
  }
}

impl From<Quality> for u8 {
  fn from(q: Quality) -> u8 {
    q.0
  }
}

/// Answer buttons offered by the study screens, mapped onto the quality scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recall {
  /// Did not remember
  Again,
  /// Remembered with effort
  Hard,
  /// Remembered
  Good,
  /// Remembered without effort
  Easy,
}

impl Recall {
  pub fn quality(self) -> Quality {
    let value = match self {
      Self::Again => 1,
      Self::Hard => 3,
      Self::Good => 4,
      Self::Easy => 5,
    };
    Quality(value)
  }

  /// Two-button review screens only ask "knew it" or "didn't"
  pub fn from_correct(correct: bool) -> Self {
    if correct { Self::Good } else { Self::Again }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "again" => Some(Self::Again),
      "hard" => Some(Self::Hard),
      "good" => Some(Self::Good),
      "easy" => Some(Self::Easy),
      _ => None,
    }
  }
}

impl From<Recall> for Quality {
  fn from(r: Recall) -> Self {
    r.quality()
  }
}

/// A single review outcome. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
  pub card_id: CardId,
  pub quality: Quality,
}

impl ReviewEvent {
  pub fn new(card_id: CardId, quality: Quality) -> Self {
    Self { card_id, quality }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quality_accepts_range() {
    for v in 1..=5 {
      assert_eq!(Quality::new(v).unwrap().value(), v);
    }
  }

  #[test]
  fn test_quality_rejects_out_of_range() {
    assert!(matches!(Quality::new(0), Err(Error::InvalidQuality(0))));
    assert!(matches!(Quality::new(6), Err(Error::InvalidQuality(6))));
    assert!(matches!(Quality::new(255), Err(Error::InvalidQuality(255))));
  }

  #[test]
  fn test_quality_success_threshold() {
    assert!(!Quality::new(1).unwrap().is_success());
    assert!(!Quality::new(2).unwrap().is_success());
    assert!(Quality::new(3).unwrap().is_success());
    assert!(Quality::new(5).unwrap().is_success());
  }

  #[test]
  fn test_quality_serde_validates() {
    let q: Quality = serde_json::from_str("4").unwrap();
    assert_eq!(q.value(), 4);
    assert!(serde_json::from_str::<Quality>("9").is_err());
    assert_eq!(serde_json::to_string(&q).unwrap(), "4");
  }

  #[test]
  fn test_recall_quality_values() {
    assert_eq!(Recall::Again.quality().value(), 1);
    assert_eq!(Recall::Hard.quality().value(), 3);
    assert_eq!(Recall::Good.quality().value(), 4);
    assert_eq!(Recall::Easy.quality().value(), 5);
  }

  #[test]
  fn test_recall_only_again_fails() {
    assert!(!Recall::Again.quality().is_success());
    assert!(Recall::Hard.quality().is_success());
    assert!(Recall::Good.quality().is_success());
    assert!(Recall::Easy.quality().is_success());
  }

  #[test]
  fn test_recall_from_correct() {
    assert_eq!(Recall::from_correct(true), Recall::Good);
    assert_eq!(Recall::from_correct(false), Recall::Again);
  }

  #[test]
  fn test_recall_str_roundtrip() {
    for r in [Recall::Again, Recall::Hard, Recall::Good, Recall::Easy] {
      assert_eq!(Recall::from_str(r.as_str()), Some(r));
    }
    assert_eq!(Recall::from_str("Easy"), None);
    assert_eq!(Recall::from_str(""), None);
  }
}
