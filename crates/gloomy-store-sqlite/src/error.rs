//! Error type for `gloomy-store-sqlite`.

use gloomy_core::entity::EntityKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gloomy_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A row whose author columns violate the user/non-user invariant.
  #[error("corrupt author columns on {0} {1}")]
  CorruptAuthor(EntityKind, i64),

  /// Attempted to save a record that has no row.
  #[error("{0} not found: {1}")]
  NotFound(EntityKind, i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
