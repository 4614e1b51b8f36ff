//! Application configuration constants.
//!
//! Scheduling parameters live here alongside the database location lookup so
//! the numbers the algorithms depend on are defined in one place.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Default database location when neither config.toml nor the environment set one
pub const DEFAULT_DATABASE_PATH: &str = "data/studydeck.db";

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    if let Some(path) = std::fs::read_to_string("config.toml")
        .ok()
        .and_then(|contents| database_path_from_toml(&contents))
    {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(DEFAULT_DATABASE_PATH);
    tracing::info!("Using default database path: {}", default.display());
    default
}

/// Extract `[database] path` from a config.toml body
fn database_path_from_toml(contents: &str) -> Option<String> {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.database.and_then(|db| db.path),
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            None
        }
    }
}

// ==================== Scheduling Configuration ====================

/// Ease factor of a card that has never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease factor never drops below this
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease lost on a failed review
pub const EASE_PENALTY: f64 = 0.2;

/// Ease gained per quality point above the passing threshold
pub const EASE_STEP: f64 = 0.1;

/// Interval after the first and second consecutive success, in days
pub const FIRST_INTERVAL_DAYS: i64 = 1;
pub const SECOND_INTERVAL_DAYS: i64 = 3;

/// Interval after a failed review, in days
pub const RELEARN_INTERVAL_DAYS: i64 = 1;

/// Longest interval the scheduler hands out (about 100 years). The ease
/// factor itself is not capped.
pub const MAX_INTERVAL_DAYS: i64 = 36_500;

// ==================== Mastery Configuration ====================

/// Interval treated as fully learned (one year)
pub const MASTERY_MAX_INTERVAL_DAYS: f64 = 365.0;

/// Ease factor treated as full marks for the ease component
pub const MASTERY_MAX_EASE_FACTOR: f64 = 2.5;

/// Repetition count treated as full marks for the repetition component
pub const MASTERY_MAX_REPETITIONS: f64 = 10.0;

pub const MASTERY_INTERVAL_WEIGHT: f64 = 0.4;
pub const MASTERY_EASE_WEIGHT: f64 = 0.3;
pub const MASTERY_REPETITIONS_WEIGHT: f64 = 0.3;

// ==================== Session Configuration ====================

/// Maximum number of rounds a study session runs, counting the first pass
pub const SESSION_MAX_ROUNDS: u32 = 3;
