//! Replies: second-level comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  author::Author,
  entity::{Entity, EntityKind},
  lifecycle::Lifecycle,
};

/// A reply to one comment on one feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
  pub id:         i64,
  pub feed_id:    i64,
  pub comment_id: i64,
  pub content:    String,
  pub author:     Author,
  pub lifecycle:  Lifecycle,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Reply {
  pub fn set_content(&mut self, content: String, at: DateTime<Utc>) -> Result<()> {
    if !self.lifecycle.is_active() {
      return Err(Error::Inactive(EntityKind::Reply, self.id));
    }
    self.content = content;
    self.updated_at = at;
    Ok(())
  }

  pub fn delete(&mut self, at: DateTime<Utc>) -> Result<()> {
    if !self.lifecycle.deactivate(at) {
      return Err(Error::AlreadyInactive(EntityKind::Reply, self.id));
    }
    Ok(())
  }
}

impl PartialEq for Reply {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
      && self.content == other.content
      && self.feed_id == other.feed_id
      && self.comment_id == other.comment_id
      && self.lifecycle.status() == other.lifecycle.status()
      && self.author == other.author
  }
}

impl Eq for Reply {}

impl Entity for Reply {
  const KIND: EntityKind = EntityKind::Reply;

  fn id(&self) -> i64 { self.id }
}

/// Input to [`crate::store::Repository::insert_reply`].
#[derive(Debug, Clone)]
pub struct NewReply {
  pub feed_id:    i64,
  pub comment_id: i64,
  pub content:    String,
  pub author:     Author,
}
