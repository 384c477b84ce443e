//! Identity shared by every persisted record.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Which table a record lives in. Used in not-found and lifecycle errors.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  User,
  Feed,
  Comment,
  Reply,
  Notice,
}

/// A persisted record with a store-assigned row id.
pub trait Entity: Send + Sync + 'static {
  const KIND: EntityKind;

  fn id(&self) -> i64;
}
