//! Soft-delete lifecycle.
//!
//! Rows are never removed by the normal delete flow. Instead a record moves
//! from [`Lifecycle::Active`] to [`Lifecycle::Inactive`] exactly once, and the
//! transition stamps the deletion time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The two-value status flag stored alongside every soft-deletable record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  Active,
  Inactive,
}

impl Status {
  /// The code stored in `status` columns.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn from_code(code: &str) -> Result<Self> {
    code
      .parse()
      .map_err(|_| Error::UnknownStatus(code.to_owned()))
  }
}

/// Status plus the deletion timestamp that only exists once inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Lifecycle {
  #[default]
  Active,
  Inactive {
    deleted_at: DateTime<Utc>,
  },
}

impl Lifecycle {
  /// Rebuild from the stored column pair. A `deleted_at` on an active row is
  /// ignored.
  pub fn from_parts(status: Status, deleted_at: Option<DateTime<Utc>>) -> Self {
    match (status, deleted_at) {
      (Status::Inactive, Some(deleted_at)) => Self::Inactive { deleted_at },
      // Rows written before deletion stamping existed.
      (Status::Inactive, None) => Self::Inactive {
        deleted_at: DateTime::<Utc>::UNIX_EPOCH,
      },
      (Status::Active, _) => Self::Active,
    }
  }

  pub fn status(&self) -> Status {
    match self {
      Self::Active => Status::Active,
      Self::Inactive { .. } => Status::Inactive,
    }
  }

  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }

  pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
    match self {
      Self::Active => None,
      Self::Inactive { deleted_at } => Some(*deleted_at),
    }
  }

  /// The only transition: `Active → Inactive { deleted_at: at }`.
  ///
  /// Returns `false` and leaves `self` untouched if already inactive.
  pub fn deactivate(&mut self, at: DateTime<Utc>) -> bool {
    match self {
      Self::Active => {
        *self = Self::Inactive { deleted_at: at };
        true
      }
      Self::Inactive { .. } => false,
    }
  }
}
