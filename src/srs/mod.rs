pub mod due;
pub mod mastery;
pub mod scheduler;
pub mod session;

pub use due::{due_cards, next_due};
pub use mastery::{card_mastery, deck_mastery};
pub use scheduler::{advance, advance_at};
pub use session::StudySession;
