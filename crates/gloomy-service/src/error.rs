//! Error type for `gloomy-service`.

use gloomy_core::entity::EntityKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A malformed request: missing fields, bad ids, both or neither of user
  /// and password, or an illegal lifecycle transition.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("{entity} not found: {id}")]
  NotFound { entity: EntityKind, id: i64 },

  #[error("password hashing failed: {0}")]
  Password(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidArgument(msg.into())
  }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

/// Domain rule violations are the caller's fault.
impl From<gloomy_core::Error> for Error {
  fn from(e: gloomy_core::Error) -> Self { Self::InvalidArgument(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
