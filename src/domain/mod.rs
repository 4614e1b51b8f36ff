pub mod card;
pub mod deck;
pub mod review;

pub use card::{Card, CardId, SchedulingState};
pub use deck::{Deck, DeckId};
pub use review::{Quality, Recall, ReviewEvent};

use rand::Rng;

/// Generate an opaque 16 character identifier for decks and cards
pub(crate) fn generate_id() -> String {
  let mut rng = rand::rng();
  (0..16)
    .map(|_| {
      let idx = rng.random_range(0..36u8);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
