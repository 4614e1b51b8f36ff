//! Deck and card persistence over SQLite.
//!
//! Timestamps are stored as RFC 3339 text and ease factors as REAL, so the
//! scheduling fields read back exactly as written. Years past 9999 are
//! written with an explicit sign (`+40730-03-18T...`), which
//! `parse_from_rfc3339` rejects, so reads go through `TIMESTAMP_FORMAT`.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::domain::{Card, CardId, Deck, DeckId, SchedulingState};

/// Accepts everything `to_rfc3339` writes, across chrono's full year range
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

fn read_timestamp(row: &Row, idx: usize) -> Result<DateTime<Utc>> {
  let value: String = row.get(idx)?;
  DateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_card(row: &Row) -> Result<Card> {
  Ok(Card {
    id: CardId(row.get(0)?),
    front: row.get(1)?,
    back: row.get(2)?,
    schedule: SchedulingState {
      interval: row.get(3)?,
      ease_factor: row.get(4)?,
      repetitions: row.get(5)?,
      next_review: read_timestamp(row, 6)?,
    },
  })
}

/// Deck row without its cards
fn row_to_deck(row: &Row) -> Result<Deck> {
  Ok(Deck {
    id: DeckId(row.get(0)?),
    title: row.get(1)?,
    description: row.get(2)?,
    cards: Vec::new(),
    mastery_level: row.get(3)?,
    last_studied: read_timestamp(row, 4)?,
    wrong_cards: Vec::new(),
  })
}

pub fn get_cards_for_deck(conn: &Connection, deck_id: &DeckId) -> Result<Vec<Card>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, front, back, interval_days, ease_factor, repetitions, next_review
    FROM cards
    WHERE deck_id = ?1
    ORDER BY position ASC
    "#,
  )?;

  let cards = stmt
    .query_map(params![deck_id.as_str()], |row| row_to_card(row))?
    .collect::<Result<Vec<_>>>()?;
  Ok(cards)
}

pub fn get_wrong_cards(conn: &Connection, deck_id: &DeckId) -> Result<Vec<CardId>> {
  let mut stmt =
    conn.prepare("SELECT card_id FROM wrong_cards WHERE deck_id = ?1 ORDER BY position ASC")?;

  let ids = stmt
    .query_map(params![deck_id.as_str()], |row| Ok(CardId(row.get(0)?)))?
    .collect::<Result<Vec<_>>>()?;
  Ok(ids)
}

fn fill_deck(conn: &Connection, mut deck: Deck) -> Result<Deck> {
  deck.cards = get_cards_for_deck(conn, &deck.id)?;
  deck.wrong_cards = get_wrong_cards(conn, &deck.id)?;
  Ok(deck)
}

pub fn get_deck(conn: &Connection, deck_id: &DeckId) -> Result<Option<Deck>> {
  let deck = conn
    .query_row(
      "SELECT id, title, description, mastery_level, last_studied FROM decks WHERE id = ?1",
      params![deck_id.as_str()],
      |row| row_to_deck(row),
    )
    .optional()?;

  match deck {
    Some(deck) => Ok(Some(fill_deck(conn, deck)?)),
    None => Ok(None),
  }
}

pub fn get_all_decks(conn: &Connection) -> Result<Vec<Deck>> {
  let mut stmt = conn.prepare(
    "SELECT id, title, description, mastery_level, last_studied FROM decks ORDER BY rowid ASC",
  )?;

  let decks = stmt
    .query_map([], |row| row_to_deck(row))?
    .collect::<Result<Vec<_>>>()?;

  decks.into_iter().map(|d| fill_deck(conn, d)).collect()
}

/// Insert or replace a deck together with its cards and wrong-card list.
pub fn save_deck(conn: &Connection, deck: &Deck) -> Result<()> {
  let tx = conn.unchecked_transaction()?;

  tx.execute(
    r#"
    INSERT INTO decks (id, title, description, mastery_level, last_studied)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
      title = excluded.title,
      description = excluded.description,
      mastery_level = excluded.mastery_level,
      last_studied = excluded.last_studied
    "#,
    params![
      deck.id.as_str(),
      deck.title,
      deck.description,
      deck.mastery_level,
      deck.last_studied.to_rfc3339(),
    ],
  )?;

  tx.execute("DELETE FROM cards WHERE deck_id = ?1", params![deck.id.as_str()])?;
  {
    let mut insert = tx.prepare(
      r#"
      INSERT INTO cards (id, deck_id, position, front, back, interval_days, ease_factor,
                         repetitions, next_review)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
      "#,
    )?;
    for (position, card) in deck.cards.iter().enumerate() {
      insert.execute(params![
        card.id.as_str(),
        deck.id.as_str(),
        position as i64,
        card.front,
        card.back,
        card.schedule.interval,
        card.schedule.ease_factor,
        card.schedule.repetitions,
        card.schedule.next_review.to_rfc3339(),
      ])?;
    }
  }

  tx.execute("DELETE FROM wrong_cards WHERE deck_id = ?1", params![deck.id.as_str()])?;
  {
    let mut insert =
      tx.prepare("INSERT INTO wrong_cards (deck_id, card_id, position) VALUES (?1, ?2, ?3)")?;
    for (position, card_id) in deck.wrong_cards.iter().enumerate() {
      insert.execute(params![deck.id.as_str(), card_id.as_str(), position as i64])?;
    }
  }

  tx.commit()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::MAX_INTERVAL_DAYS;
  use crate::db::schema::run_migrations;
  use crate::domain::Quality;
  use crate::srs::advance_at;
  use chrono::{Duration, TimeZone};

  fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
  }

  fn sample_deck() -> Deck {
    let now = Utc.with_ymd_and_hms(2026, 2, 14, 18, 45, 12).unwrap();
    let mut deck = Deck::new_at(
      "Chemistry".to_string(),
      "Periodic table".to_string(),
      vec![
        ("H".to_string(), "Hydrogen".to_string()),
        ("He".to_string(), "Helium".to_string()),
        ("Li".to_string(), "Lithium".to_string()),
      ],
      now,
    );
    deck.cards[1].schedule = SchedulingState {
      interval: 17,
      ease_factor: 2.3600000000000003,
      repetitions: 4,
      next_review: now + Duration::days(17) + Duration::milliseconds(123),
    };
    deck.recompute_mastery();
    deck
  }

  #[test]
  fn test_save_and_load_roundtrip() {
    let conn = conn();
    let deck = sample_deck();
    save_deck(&conn, &deck).unwrap();

    let loaded = get_deck(&conn, &deck.id).unwrap().unwrap();
    assert_eq!(loaded, deck);
  }

  #[test]
  fn test_scheduling_fields_exact() {
    let conn = conn();
    let deck = sample_deck();
    save_deck(&conn, &deck).unwrap();

    let cards = get_cards_for_deck(&conn, &deck.id).unwrap();
    assert_eq!(cards[1].schedule, deck.cards[1].schedule);
    assert_eq!(cards[1].schedule.ease_factor.to_bits(), 2.3600000000000003f64.to_bits());
  }

  #[test]
  fn test_card_order_preserved() {
    let conn = conn();
    let deck = sample_deck();
    save_deck(&conn, &deck).unwrap();

    let fronts: Vec<String> = get_cards_for_deck(&conn, &deck.id)
      .unwrap()
      .into_iter()
      .map(|c| c.front)
      .collect();
    assert_eq!(fronts, vec!["H", "He", "Li"]);
  }

  #[test]
  fn test_save_replaces_existing() {
    let conn = conn();
    let mut deck = sample_deck();
    save_deck(&conn, &deck).unwrap();

    deck.title = "Chem".to_string();
    deck.cards.pop();
    deck.wrong_cards = vec![deck.cards[0].id.clone()];
    save_deck(&conn, &deck).unwrap();

    let loaded = get_deck(&conn, &deck.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Chem");
    assert_eq!(loaded.cards.len(), 2);
    assert_eq!(loaded.wrong_cards, vec![deck.cards[0].id.clone()]);
    assert_eq!(get_all_decks(&conn).unwrap().len(), 1);
  }

  #[test]
  fn test_get_missing_deck() {
    let conn = conn();
    assert!(get_deck(&conn, &DeckId::from("nope")).unwrap().is_none());
  }

  #[test]
  fn test_get_all_decks_in_insert_order() {
    let conn = conn();
    let first = Deck::new("First".to_string(), String::new(), Vec::new());
    let second = Deck::new("Second".to_string(), String::new(), Vec::new());
    save_deck(&conn, &first).unwrap();
    save_deck(&conn, &second).unwrap();

    let titles: Vec<String> = get_all_decks(&conn).unwrap().into_iter().map(|d| d.title).collect();
    assert_eq!(titles, vec!["First", "Second"]);
  }

  #[test]
  fn test_corrupt_timestamp_is_an_error() {
    let conn = conn();
    let deck = sample_deck();
    save_deck(&conn, &deck).unwrap();
    conn
      .execute("UPDATE cards SET next_review = 'yesterday'", [])
      .unwrap();

    assert!(get_cards_for_deck(&conn, &deck.id).is_err());
  }

  #[test]
  fn test_card_at_interval_cap_roundtrips() {
    let conn = conn();
    let mut deck = sample_deck();
    let reviewed = deck.last_studied;
    let mut schedule = deck.cards[0].schedule;
    for _ in 0..30 {
      schedule = advance_at(&schedule, Quality::new(5).unwrap(), reviewed);
    }
    assert_eq!(schedule.interval, MAX_INTERVAL_DAYS);
    deck.cards[0].schedule = schedule;
    deck.recompute_mastery();
    save_deck(&conn, &deck).unwrap();

    let loaded = get_deck(&conn, &deck.id).unwrap().unwrap();
    assert_eq!(loaded, deck);
    assert_eq!(get_all_decks(&conn).unwrap(), vec![deck]);
  }

  #[test]
  fn test_far_future_timestamps_roundtrip() {
    let conn = conn();
    let mut deck = sample_deck();
    deck.cards[2].schedule.next_review =
      Utc.with_ymd_and_hms(40730, 3, 18, 12, 0, 0).unwrap() + Duration::nanoseconds(5);
    deck.cards[1].schedule.next_review = Utc.with_ymd_and_hms(-44, 3, 15, 0, 0, 0).unwrap();
    deck.last_studied = DateTime::<Utc>::MAX_UTC;
    save_deck(&conn, &deck).unwrap();

    let stored: String = conn
      .query_row(
        "SELECT next_review FROM cards WHERE id = ?1",
        params![deck.cards[2].id.as_str()],
        |row| row.get(0),
      )
      .unwrap();
    assert!(stored.starts_with("+40730-03-18T12:00:00"));

    let loaded = get_deck(&conn, &deck.id).unwrap().unwrap();
    assert_eq!(loaded, deck);
  }
}
