//! The persistence traits and their supporting types.
//!
//! Traits are implemented by storage backends (e.g. `gloomy-store-sqlite`).
//! Services depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  comment::{Comment, NewComment},
  entity::Entity,
  feed::{Feed, NewFeed},
  lifecycle::Status,
  notice::{NewNotice, Notice},
  page::{Page, PageRequest},
  reply::{NewReply, Reply},
  user::{NewUser, User},
};

// ─── Repository ──────────────────────────────────────────────────────────────

/// Writes and predicate queries over every table.
///
/// Id assignment and `created_at`/`updated_at` stamping on insert belong to
/// the store. A `status` of `None` in a query means "any status".
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait Repository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new account with an active join status.
  fn insert_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// The account registered under `email`, whatever its join status.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Feeds ─────────────────────────────────────────────────────────────

  fn insert_feed(
    &self,
    input: NewFeed,
  ) -> impl Future<Output = Result<Feed, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  fn insert_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Write back the mutable columns (content, status, timestamps) of an
  /// existing comment.
  fn save_comment(
    &self,
    comment: Comment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Comments on a feed, oldest first.
  fn list_comments_by_feed(
    &self,
    feed_id: i64,
    status: Option<Status>,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Comment>, Self::Error>> + Send + '_;

  /// Comments written by a registered user, newest first.
  fn list_comments_by_user(
    &self,
    user_id: i64,
    status: Option<Status>,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Comment>, Self::Error>> + Send + '_;

  fn count_comments_by_feed(
    &self,
    feed_id: i64,
    status: Option<Status>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Physically remove every comment (and, by cascade, every reply).
  /// Returns the number of comment rows removed.
  fn delete_all_comments(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Replies ───────────────────────────────────────────────────────────

  fn insert_reply(
    &self,
    input: NewReply,
  ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + '_;

  fn save_reply(
    &self,
    reply: Reply,
  ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + '_;

  /// Replies to a comment, oldest first.
  fn list_replies_by_comment(
    &self,
    comment_id: i64,
    status: Option<Status>,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Reply>, Self::Error>> + Send + '_;

  fn delete_all_replies(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Notices ───────────────────────────────────────────────────────────

  fn insert_notice(
    &self,
    input: NewNotice,
  ) -> impl Future<Output = Result<Notice, Self::Error>> + Send + '_;

  /// Notices addressed to a user, newest first.
  fn list_notices_for(
    &self,
    recipient_id: i64,
  ) -> impl Future<Output = Result<Vec<Notice>, Self::Error>> + Send + '_;
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// Find a single record by id. Returns `None` if no row matches.
pub trait Lookup<T: Entity>: Repository {
  fn lookup(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send + '_;
}

/// Everything the service layer needs from a backend.
pub trait Store:
  Repository + Lookup<User> + Lookup<Feed> + Lookup<Comment> + Lookup<Reply>
{
}

impl<S> Store for S where
  S: Repository + Lookup<User> + Lookup<Feed> + Lookup<Comment> + Lookup<Reply>
{
}
