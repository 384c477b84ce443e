//! Registered accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{Entity, EntityKind},
  lifecycle::Status,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:          i64,
  pub email:       String,
  pub name:        String,
  /// `Inactive` once the account has left; such users no longer resolve.
  pub join_status: Status,
  pub created_at:  DateTime<Utc>,
}

impl Entity for User {
  const KIND: EntityKind = EntityKind::User;

  fn id(&self) -> i64 { self.id }
}

/// Input to [`crate::store::Repository::insert_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub name:  String,
}
