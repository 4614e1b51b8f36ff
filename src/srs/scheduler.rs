use chrono::{DateTime, TimeDelta, Utc};

use crate::config::{
  EASE_PENALTY, EASE_STEP, FIRST_INTERVAL_DAYS, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR,
  RELEARN_INTERVAL_DAYS, SECOND_INTERVAL_DAYS,
};
use crate::domain::review::PASSING_QUALITY;
use crate::domain::{Quality, SchedulingState};

/// Compute the next scheduling state for a review happening now.
pub fn advance(state: &SchedulingState, quality: Quality) -> SchedulingState {
  advance_at(state, quality, Utc::now())
}

/// Compute the next scheduling state for a review at `now`.
///
/// A failed review (quality < 3) resets repetitions and schedules the card
/// for tomorrow, keeping the penalized ease so the card's difficulty is
/// remembered. A success grows the interval 1 → 3 → previous × ease, up to
/// `MAX_INTERVAL_DAYS`.
pub fn advance_at(state: &SchedulingState, quality: Quality, now: DateTime<Utc>) -> SchedulingState {
  let (interval, ease_factor, repetitions) = if !quality.is_success() {
    let ease = (state.ease_factor - EASE_PENALTY).max(MIN_EASE_FACTOR);
    (RELEARN_INTERVAL_DAYS, ease, 0)
  } else {
    let repetitions = state.repetitions.saturating_add(1);
    // No upper bound on ease: it keeps growing with easy answers
    let delta = EASE_STEP * (quality.value() as f64 - PASSING_QUALITY as f64);
    let ease = (state.ease_factor + delta).max(MIN_EASE_FACTOR);

    let interval = match repetitions {
      1 => FIRST_INTERVAL_DAYS,
      2 => SECOND_INTERVAL_DAYS,
      _ => ((state.interval as f64) * ease).round() as i64,
    };
    (interval.clamp(0, MAX_INTERVAL_DAYS), ease, repetitions)
  };

  SchedulingState {
    interval,
    ease_factor,
    repetitions,
    next_review: review_date(now, interval),
  }
}

/// `now + days`, saturating at the latest representable instant.
fn review_date(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  TimeDelta::try_days(days)
    .and_then(|delta| now.checked_add_signed(delta))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
