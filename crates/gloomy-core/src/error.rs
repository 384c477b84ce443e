//! Error types for `gloomy-core`.

use thiserror::Error;

use crate::entity::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("exactly one of user id or password must be given")]
  AmbiguousAuthor,

  #[error("{0} {1} is already inactive")]
  AlreadyInactive(EntityKind, i64),

  #[error("{0} {1} is inactive and cannot be edited")]
  Inactive(EntityKind, i64),

  #[error("unknown category code: {0:?}")]
  UnknownCategory(String),

  #[error("unknown status code: {0:?}")]
  UnknownStatus(String),

  #[error("unknown notice kind: {0:?}")]
  UnknownNoticeKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
