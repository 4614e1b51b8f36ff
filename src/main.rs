use chrono::Utc;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studydeck::config;
use studydeck::db::SqliteStore;
use studydeck::service::StudyService;
use studydeck::stats::Overview;

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "studydeck=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let json = std::env::args().skip(1).any(|arg| arg == "--json");

  match run(json) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{}", e);
      ExitCode::FAILURE
    }
  }
}

fn run(json: bool) -> studydeck::Result<()> {
  let db_path = config::load_database_path();
  let service = StudyService::new(SqliteStore::open(&db_path)?);
  let overview = service.overview(Utc::now())?;

  if json {
    println!("{}", serde_json::to_string_pretty(&overview)?);
  } else {
    print_report(&overview);
  }
  Ok(())
}

fn print_report(overview: &Overview) {
  if overview.decks.is_empty() {
    println!("No decks yet.");
    return;
  }

  for deck in &overview.decks {
    let next = deck
      .next_review
      .map(|day| day.label())
      .unwrap_or_else(|| "-".to_string());
    println!(
      "{:<30} {:>4} cards {:>4} due  mastery {:>3}%  next {}",
      deck.title, deck.total_cards, deck.due_now, deck.mastery_level, next
    );
  }

  println!();
  println!(
    "{} cards across {} decks, {} marked wrong, average mastery {}%",
    overview.total_cards,
    overview.decks.len(),
    overview.total_wrong_cards,
    overview.average_mastery
  );
  if let Some(last) = overview.last_studied {
    println!("Last studied {}", last.format("%Y-%m-%d %H:%M UTC"));
  }
}
