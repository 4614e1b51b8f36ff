use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS decks (
      id TEXT PRIMARY KEY,
      title TEXT NOT NULL,
      description TEXT NOT NULL DEFAULT '',
      mastery_level INTEGER NOT NULL DEFAULT 0,
      last_studied TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cards (
      id TEXT PRIMARY KEY,
      deck_id TEXT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
      position INTEGER NOT NULL,
      front TEXT NOT NULL,
      back TEXT NOT NULL,
      interval_days INTEGER NOT NULL DEFAULT 0,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      repetitions INTEGER NOT NULL DEFAULT 0,
      next_review TEXT NOT NULL
    );

    -- Cards missed in the deck's most recent study session
    CREATE TABLE IF NOT EXISTS wrong_cards (
      deck_id TEXT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
      card_id TEXT NOT NULL,
      position INTEGER NOT NULL,
      PRIMARY KEY (deck_id, card_id)
    );

    CREATE INDEX IF NOT EXISTS idx_cards_deck ON cards(deck_id, position);
    CREATE INDEX IF NOT EXISTS idx_cards_next_review ON cards(next_review);
    "#,
  )?;

  Ok(())
}
