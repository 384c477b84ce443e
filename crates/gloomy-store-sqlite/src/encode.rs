//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enumerations are stored as
//! their code strings. Authors are spread over three nullable columns.

use chrono::{DateTime, Utc};
use gloomy_core::{
  author::{Author, NonUser},
  comment::Comment,
  entity::EntityKind,
  feed::{Category, Feed},
  lifecycle::{Lifecycle, Status},
  notice::{Notice, NoticeKind},
  reply::Reply,
  user::User,
};

use crate::{Error, Result};

// ─── DateTime ────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

/// `(status, deleted_at)` column pair.
pub fn encode_lifecycle(lc: &Lifecycle) -> (&'static str, Option<String>) {
  (lc.status().as_str(), lc.deleted_at().map(encode_dt))
}

pub fn decode_lifecycle(status: &str, deleted_at: Option<&str>) -> Result<Lifecycle> {
  let status = Status::from_code(status)?;
  let deleted_at = deleted_at.map(decode_dt).transpose()?;
  Ok(Lifecycle::from_parts(status, deleted_at))
}

// ─── Author ──────────────────────────────────────────────────────────────────

/// Columns `(user_id, non_user_name, non_user_password)`.
pub type AuthorColumns = (Option<i64>, Option<String>, Option<String>);

pub fn encode_author(author: &Author) -> AuthorColumns {
  match author {
    Author::Registered { user_id } => (Some(*user_id), None, None),
    Author::Anonymous(n) => {
      (None, Some(n.name.clone()), Some(n.password_hash.clone()))
    }
  }
}

pub fn decode_author(kind: EntityKind, id: i64, cols: AuthorColumns) -> Result<Author> {
  match cols {
    (Some(user_id), None, None) => Ok(Author::Registered { user_id }),
    (None, Some(name), Some(password_hash)) => {
      Ok(Author::Anonymous(NonUser { name, password_hash }))
    }
    _ => Err(Error::CorruptAuthor(kind, id)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "id, email, name, join_status, created_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:          i64,
  pub email:       String,
  pub name:        String,
  pub join_status: String,
  pub created_at:  String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      email:       row.get(1)?,
      name:        row.get(2)?,
      join_status: row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:          self.id,
      email:       self.email,
      name:        self.name,
      join_status: Status::from_code(&self.join_status)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const FEED_COLUMNS: &str = "id, content, category, user_id, non_user_name, \
  non_user_password, status, created_at, updated_at, deleted_at";

pub struct RawFeed {
  pub id:         i64,
  pub content:    String,
  pub category:   String,
  pub author:     AuthorColumns,
  pub status:     String,
  pub created_at: String,
  pub updated_at: String,
  pub deleted_at: Option<String>,
}

impl RawFeed {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      content:    row.get(1)?,
      category:   row.get(2)?,
      author:     (row.get(3)?, row.get(4)?, row.get(5)?),
      status:     row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
      deleted_at: row.get(9)?,
    })
  }

  pub fn into_feed(self) -> Result<Feed> {
    Ok(Feed {
      id:         self.id,
      content:    self.content,
      category:   Category::try_from(self.category)?,
      author:     decode_author(EntityKind::Feed, self.id, self.author)?,
      lifecycle:  decode_lifecycle(&self.status, self.deleted_at.as_deref())?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const COMMENT_COLUMNS: &str = "id, feed_id, content, user_id, non_user_name, \
  non_user_password, status, created_at, updated_at, deleted_at";

pub struct RawComment {
  pub id:         i64,
  pub feed_id:    i64,
  pub content:    String,
  pub author:     AuthorColumns,
  pub status:     String,
  pub created_at: String,
  pub updated_at: String,
  pub deleted_at: Option<String>,
}

impl RawComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      feed_id:    row.get(1)?,
      content:    row.get(2)?,
      author:     (row.get(3)?, row.get(4)?, row.get(5)?),
      status:     row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
      deleted_at: row.get(9)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:         self.id,
      feed_id:    self.feed_id,
      content:    self.content,
      author:     decode_author(EntityKind::Comment, self.id, self.author)?,
      lifecycle:  decode_lifecycle(&self.status, self.deleted_at.as_deref())?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const REPLY_COLUMNS: &str = "id, feed_id, comment_id, content, user_id, \
  non_user_name, non_user_password, status, created_at, updated_at, deleted_at";

pub struct RawReply {
  pub id:         i64,
  pub feed_id:    i64,
  pub comment_id: i64,
  pub content:    String,
  pub author:     AuthorColumns,
  pub status:     String,
  pub created_at: String,
  pub updated_at: String,
  pub deleted_at: Option<String>,
}

impl RawReply {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      feed_id:    row.get(1)?,
      comment_id: row.get(2)?,
      content:    row.get(3)?,
      author:     (row.get(4)?, row.get(5)?, row.get(6)?),
      status:     row.get(7)?,
      created_at: row.get(8)?,
      updated_at: row.get(9)?,
      deleted_at: row.get(10)?,
    })
  }

  pub fn into_reply(self) -> Result<Reply> {
    Ok(Reply {
      id:         self.id,
      feed_id:    self.feed_id,
      comment_id: self.comment_id,
      content:    self.content,
      author:     decode_author(EntityKind::Reply, self.id, self.author)?,
      lifecycle:  decode_lifecycle(&self.status, self.deleted_at.as_deref())?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const NOTICE_COLUMNS: &str =
  "id, feed_id, recipient_id, kind, source_id, is_read, created_at";

pub struct RawNotice {
  pub id:           i64,
  pub feed_id:      i64,
  pub recipient_id: Option<i64>,
  pub kind:         String,
  pub source_id:    i64,
  pub is_read:      bool,
  pub created_at:   String,
}

impl RawNotice {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      feed_id:      row.get(1)?,
      recipient_id: row.get(2)?,
      kind:         row.get(3)?,
      source_id:    row.get(4)?,
      is_read:      row.get(5)?,
      created_at:   row.get(6)?,
    })
  }

  pub fn into_notice(self) -> Result<Notice> {
    Ok(Notice {
      id:           self.id,
      feed_id:      self.feed_id,
      recipient_id: self.recipient_id,
      kind:         NoticeKind::from_code(&self.kind)?,
      source_id:    self.source_id,
      is_read:      self.is_read,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
