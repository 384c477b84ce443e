//! Comments on a feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  author::Author,
  entity::{Entity, EntityKind},
  lifecycle::Lifecycle,
};

/// A comment on exactly one feed, by exactly one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
  pub id:         i64,
  pub feed_id:    i64,
  pub content:    String,
  pub author:     Author,
  pub lifecycle:  Lifecycle,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Comment {
  /// Replace the body. Inactive comments are frozen.
  pub fn set_content(&mut self, content: String, at: DateTime<Utc>) -> Result<()> {
    if !self.lifecycle.is_active() {
      return Err(Error::Inactive(EntityKind::Comment, self.id));
    }
    self.content = content;
    self.updated_at = at;
    Ok(())
  }

  /// Soft delete: flip to inactive and stamp `at`.
  pub fn delete(&mut self, at: DateTime<Utc>) -> Result<()> {
    if !self.lifecycle.deactivate(at) {
      return Err(Error::AlreadyInactive(EntityKind::Comment, self.id));
    }
    Ok(())
  }
}

/// Timestamps are not part of a comment's identity.
impl PartialEq for Comment {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
      && self.content == other.content
      && self.feed_id == other.feed_id
      && self.lifecycle.status() == other.lifecycle.status()
      && self.author == other.author
  }
}

impl Eq for Comment {}

impl Entity for Comment {
  const KIND: EntityKind = EntityKind::Comment;

  fn id(&self) -> i64 { self.id }
}

/// Input to [`crate::store::Repository::insert_comment`]. The store assigns
/// the id and timestamps; new comments are always active.
#[derive(Debug, Clone)]
pub struct NewComment {
  pub feed_id: i64,
  pub content: String,
  pub author:  Author,
}
