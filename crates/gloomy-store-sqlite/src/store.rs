//! [`SqliteStore`], the SQLite implementation of the store traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use gloomy_core::{
  comment::{Comment, NewComment},
  entity::EntityKind,
  feed::{Feed, NewFeed},
  lifecycle::{Lifecycle, Status},
  notice::{NewNotice, Notice},
  page::{Page, PageRequest},
  reply::{NewReply, Reply},
  store::{Lookup, Repository},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    COMMENT_COLUMNS, FEED_COLUMNS, NOTICE_COLUMNS, REPLY_COLUMNS, RawComment,
    RawFeed, RawNotice, RawReply, RawUser, USER_COLUMNS, encode_author,
    encode_dt, encode_lifecycle,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A gloomy store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Flip a user's join status. Inactive users stop resolving in services.
  pub async fn set_join_status(&self, user_id: i64, status: Status) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET join_status = ?2 WHERE id = ?1",
          rusqlite::params![user_id, status.as_str()],
        )?)
      })
      .await?;
    if changed == 0 {
      return Err(Error::NotFound(EntityKind::User, user_id));
    }
    Ok(())
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            rusqlite::params![id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_feed(&self, id: i64) -> Result<Option<Feed>> {
    let raw: Option<RawFeed> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {FEED_COLUMNS} FROM feeds WHERE id = ?1"),
            rusqlite::params![id],
            RawFeed::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawFeed::into_feed).transpose()
  }

  async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1"),
            rusqlite::params![id],
            RawComment::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }

  async fn get_reply(&self, id: i64) -> Result<Option<Reply>> {
    let raw: Option<RawReply> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {REPLY_COLUMNS} FROM replies WHERE id = ?1"),
            rusqlite::params![id],
            RawReply::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawReply::into_reply).transpose()
  }

  /// Shared paged query over `comments`. `filter` is a WHERE fragment using
  /// `?1` for the key and `?2` for an optional status.
  async fn page_comments(
    &self,
    filter: &'static str,
    order: &'static str,
    key: i64,
    status: Option<Status>,
    page: PageRequest,
  ) -> Result<Page<Comment>> {
    let status_str = status.map(Status::as_str);
    let (limit, offset) = sql_bounds(page);

    let (raws, total): (Vec<RawComment>, i64) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!(
            "SELECT COUNT(*) FROM comments
             WHERE {filter} AND (?2 IS NULL OR status = ?2)"
          ),
          rusqlite::params![key, status_str],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM comments
           WHERE {filter} AND (?2 IS NULL OR status = ?2)
           ORDER BY {order}
           LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![key, status_str, limit, offset],
            RawComment::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let content = raws
      .into_iter()
      .map(RawComment::into_comment)
      .collect::<Result<Vec<_>>>()?;
    Ok(Page::new(content, page, total as u64))
  }
}

/// `LIMIT`/`OFFSET` parameters. An offset past `i64::MAX` saturates, so an
/// absurd page reads past the end instead of wrapping back to the start.
fn sql_bounds(page: PageRequest) -> (i64, i64) {
  let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
  let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
  (limit, offset)
}

// ─── Repository impl ─────────────────────────────────────────────────────────

impl Repository for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn insert_user(&self, input: NewUser) -> Result<User> {
    let created_at = Utc::now();

    let email  = input.email.clone();
    let name   = input.name.clone();
    let at_str = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (email, name, join_status, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![email, name, Status::Active.as_str(), at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id,
      email: input.email,
      name: input.name,
      join_status: Status::Active,
      created_at,
    })
  }

  async fn find_user_by_email<'a>(&'a self, email: &'a str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            rusqlite::params![email],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Feeds ─────────────────────────────────────────────────────────────────

  async fn insert_feed(&self, input: NewFeed) -> Result<Feed> {
    let now = Utc::now();

    let content = input.content.clone();
    let category = input.category.code();
    let (user_id, nu_name, nu_pw) = encode_author(&input.author);
    let at_str = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO feeds (
             content, category, user_id, non_user_name, non_user_password,
             status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            content,
            category,
            user_id,
            nu_name,
            nu_pw,
            Status::Active.as_str(),
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Feed {
      id,
      content: input.content,
      category: input.category,
      author: input.author,
      lifecycle: Lifecycle::Active,
      created_at: now,
      updated_at: now,
    })
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn insert_comment(&self, input: NewComment) -> Result<Comment> {
    let now = Utc::now();

    let feed_id = input.feed_id;
    let content = input.content.clone();
    let (user_id, nu_name, nu_pw) = encode_author(&input.author);
    let at_str = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (
             feed_id, content, user_id, non_user_name, non_user_password,
             status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            feed_id,
            content,
            user_id,
            nu_name,
            nu_pw,
            Status::Active.as_str(),
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Comment {
      id,
      feed_id: input.feed_id,
      content: input.content,
      author: input.author,
      lifecycle: Lifecycle::Active,
      created_at: now,
      updated_at: now,
    })
  }

  async fn save_comment(&self, comment: Comment) -> Result<Comment> {
    let id = comment.id;
    let content = comment.content.clone();
    let (status, deleted_at) = encode_lifecycle(&comment.lifecycle);
    let updated_at = encode_dt(comment.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE comments
           SET content = ?2, status = ?3, updated_at = ?4, deleted_at = ?5
           WHERE id = ?1",
          rusqlite::params![id, content, status, updated_at, deleted_at],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound(EntityKind::Comment, id));
    }
    Ok(comment)
  }

  async fn list_comments_by_feed(
    &self,
    feed_id: i64,
    status:  Option<Status>,
    page:    PageRequest,
  ) -> Result<Page<Comment>> {
    self
      .page_comments("feed_id = ?1", "id ASC", feed_id, status, page)
      .await
  }

  async fn list_comments_by_user(
    &self,
    user_id: i64,
    status:  Option<Status>,
    page:    PageRequest,
  ) -> Result<Page<Comment>> {
    self
      .page_comments("user_id = ?1", "id DESC", user_id, status, page)
      .await
  }

  async fn count_comments_by_feed(
    &self,
    feed_id: i64,
    status:  Option<Status>,
  ) -> Result<u64> {
    let status_str = status.map(Status::as_str);

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM comments
           WHERE feed_id = ?1 AND (?2 IS NULL OR status = ?2)",
          rusqlite::params![feed_id, status_str],
          |r| r.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn delete_all_comments(&self) -> Result<u64> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM comments", [])?))
      .await?;
    Ok(removed as u64)
  }

  // ── Replies ───────────────────────────────────────────────────────────────

  async fn insert_reply(&self, input: NewReply) -> Result<Reply> {
    let now = Utc::now();

    let feed_id = input.feed_id;
    let comment_id = input.comment_id;
    let content = input.content.clone();
    let (user_id, nu_name, nu_pw) = encode_author(&input.author);
    let at_str = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO replies (
             feed_id, comment_id, content, user_id, non_user_name,
             non_user_password, status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            feed_id,
            comment_id,
            content,
            user_id,
            nu_name,
            nu_pw,
            Status::Active.as_str(),
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Reply {
      id,
      feed_id: input.feed_id,
      comment_id: input.comment_id,
      content: input.content,
      author: input.author,
      lifecycle: Lifecycle::Active,
      created_at: now,
      updated_at: now,
    })
  }

  async fn save_reply(&self, reply: Reply) -> Result<Reply> {
    let id = reply.id;
    let content = reply.content.clone();
    let (status, deleted_at) = encode_lifecycle(&reply.lifecycle);
    let updated_at = encode_dt(reply.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE replies
           SET content = ?2, status = ?3, updated_at = ?4, deleted_at = ?5
           WHERE id = ?1",
          rusqlite::params![id, content, status, updated_at, deleted_at],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound(EntityKind::Reply, id));
    }
    Ok(reply)
  }

  async fn list_replies_by_comment(
    &self,
    comment_id: i64,
    status:     Option<Status>,
    page:       PageRequest,
  ) -> Result<Page<Reply>> {
    let status_str = status.map(Status::as_str);
    let (limit, offset) = sql_bounds(page);

    let (raws, total): (Vec<RawReply>, i64) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          "SELECT COUNT(*) FROM replies
           WHERE comment_id = ?1 AND (?2 IS NULL OR status = ?2)",
          rusqlite::params![comment_id, status_str],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {REPLY_COLUMNS} FROM replies
           WHERE comment_id = ?1 AND (?2 IS NULL OR status = ?2)
           ORDER BY id ASC
           LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![comment_id, status_str, limit, offset],
            RawReply::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let content = raws
      .into_iter()
      .map(RawReply::into_reply)
      .collect::<Result<Vec<_>>>()?;
    Ok(Page::new(content, page, total as u64))
  }

  async fn delete_all_replies(&self) -> Result<u64> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM replies", [])?))
      .await?;
    Ok(removed as u64)
  }

  // ── Notices ───────────────────────────────────────────────────────────────

  async fn insert_notice(&self, input: NewNotice) -> Result<Notice> {
    let created_at = Utc::now();

    let feed_id      = input.feed_id;
    let recipient_id = input.recipient_id;
    let kind         = input.kind.as_str();
    let source_id    = input.source_id;
    let at_str       = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notices (feed_id, recipient_id, kind, source_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![feed_id, recipient_id, kind, source_id, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Notice {
      id,
      feed_id: input.feed_id,
      recipient_id: input.recipient_id,
      kind: input.kind,
      source_id: input.source_id,
      is_read: false,
      created_at,
    })
  }

  async fn list_notices_for(&self, recipient_id: i64) -> Result<Vec<Notice>> {
    let raws: Vec<RawNotice> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTICE_COLUMNS} FROM notices
           WHERE recipient_id = ?1
           ORDER BY id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![recipient_id], RawNotice::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotice::into_notice).collect()
  }
}

// ─── Lookup impls ────────────────────────────────────────────────────────────

impl Lookup<User> for SqliteStore {
  async fn lookup(&self, id: i64) -> Result<Option<User>> { self.get_user(id).await }
}

impl Lookup<Feed> for SqliteStore {
  async fn lookup(&self, id: i64) -> Result<Option<Feed>> { self.get_feed(id).await }
}

impl Lookup<Comment> for SqliteStore {
  async fn lookup(&self, id: i64) -> Result<Option<Comment>> {
    self.get_comment(id).await
  }
}

impl Lookup<Reply> for SqliteStore {
  async fn lookup(&self, id: i64) -> Result<Option<Reply>> {
    self.get_reply(id).await
  }
}
