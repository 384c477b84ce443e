//! Response projections.
//!
//! Domain records carry anonymous password hashes; these views never do.

use chrono::{DateTime, Utc};
use gloomy_core::{
  author::Author,
  comment::Comment,
  feed::{Category, Feed},
  lifecycle::Status,
  reply::Reply,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthorView {
  Registered { user_id: i64 },
  Anonymous { name: String },
}

impl From<Author> for AuthorView {
  fn from(a: Author) -> Self {
    match a {
      Author::Registered { user_id } => Self::Registered { user_id },
      Author::Anonymous(n) => Self::Anonymous { name: n.name },
    }
  }
}

#[derive(Debug, Serialize)]
pub struct FeedView {
  pub id:             i64,
  pub content:        String,
  pub category:       Category,
  pub category_title: &'static str,
  pub author:         AuthorView,
  pub status:         Status,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
  pub deleted_at:     Option<DateTime<Utc>>,
}

impl From<Feed> for FeedView {
  fn from(f: Feed) -> Self {
    Self {
      id:             f.id,
      content:        f.content,
      category:       f.category,
      category_title: f.category.title(),
      author:         f.author.into(),
      status:         f.lifecycle.status(),
      created_at:     f.created_at,
      updated_at:     f.updated_at,
      deleted_at:     f.lifecycle.deleted_at(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CommentView {
  pub id:         i64,
  pub feed_id:    i64,
  pub content:    String,
  pub author:     AuthorView,
  pub status:     Status,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentView {
  fn from(c: Comment) -> Self {
    Self {
      id:         c.id,
      feed_id:    c.feed_id,
      content:    c.content,
      author:     c.author.into(),
      status:     c.lifecycle.status(),
      created_at: c.created_at,
      updated_at: c.updated_at,
      deleted_at: c.lifecycle.deleted_at(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ReplyView {
  pub id:         i64,
  pub feed_id:    i64,
  pub comment_id: i64,
  pub content:    String,
  pub author:     AuthorView,
  pub status:     Status,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Reply> for ReplyView {
  fn from(r: Reply) -> Self {
    Self {
      id:         r.id,
      feed_id:    r.feed_id,
      comment_id: r.comment_id,
      content:    r.content,
      author:     r.author.into(),
      status:     r.lifecycle.status(),
      created_at: r.created_at,
      updated_at: r.updated_at,
      deleted_at: r.lifecycle.deleted_at(),
    }
  }
}
