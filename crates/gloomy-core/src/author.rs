//! Who wrote a feed, comment, or reply.
//!
//! Content is authored either by a registered [`User`](crate::user::User) or
//! by an anonymous guest who only leaves a display name and a password. The
//! password is later used to authorise edits, so only its hash is kept.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Display name given to every anonymous author ("anonymous friend").
pub const ANONYMOUS_NAME: &str = "익명 친구";

/// An anonymous author with no persistent account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonUser {
  pub name:          String,
  /// PHC string, e.g. `$argon2id$v=19$…`. Never the plaintext.
  pub password_hash: String,
}

impl NonUser {
  /// A non-user with the default display name.
  pub fn anonymous(password_hash: impl Into<String>) -> Self {
    Self {
      name:          ANONYMOUS_NAME.to_owned(),
      password_hash: password_hash.into(),
    }
  }
}

/// The persisted author of a record. Exactly one branch is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Author {
  Registered { user_id: i64 },
  Anonymous(NonUser),
}

impl Author {
  pub fn user_id(&self) -> Option<i64> {
    match self {
      Self::Registered { user_id } => Some(*user_id),
      Self::Anonymous(_) => None,
    }
  }

  pub fn non_user(&self) -> Option<&NonUser> {
    match self {
      Self::Registered { .. } => None,
      Self::Anonymous(n) => Some(n),
    }
  }
}

/// The caller-side claim of authorship, before any lookup or hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
  /// An authenticated member, by user id.
  Member(i64),
  /// An anonymous guest, by plaintext password.
  Guest(String),
}

impl Identity {
  /// Build an identity from the two optional request fields. Exactly one of
  /// them must be present.
  pub fn exclusive(user_id: Option<i64>, password: Option<String>) -> Result<Self> {
    match (user_id, password) {
      (Some(id), None) => Ok(Self::Member(id)),
      (None, Some(pw)) => Ok(Self::Guest(pw)),
      _ => Err(Error::AmbiguousAuthor),
    }
  }
}
