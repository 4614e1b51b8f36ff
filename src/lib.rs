pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod service;
pub mod srs;
pub mod stats;

#[cfg(test)]
pub mod testing;

pub use error::{Error, Result};
