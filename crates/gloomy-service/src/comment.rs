//! Comments on feeds.

use std::sync::Arc;

use chrono::Utc;
use gloomy_core::{
  author::Identity,
  comment::{Comment, NewComment},
  lifecycle::Status,
  notice::NoticeKind,
  page::{Page, PageRequest},
  store::Store,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
  Error, FeedService, NoticeService, Result, UserService, require_id, resolve,
};

/// New-comment request. The caller's user id, when authenticated, travels
/// separately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRequest {
  pub content:  Option<String>,
  pub feed_id:  Option<i64>,
  /// Set by anonymous commenters only.
  pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
  pub content: Option<String>,
}

pub struct CommentService<S> {
  store:   Arc<S>,
  users:   UserService<S>,
  feeds:   FeedService<S>,
  notices: NoticeService<S>,
}

impl<S> Clone for CommentService<S> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      users:   self.users.clone(),
      feeds:   self.feeds.clone(),
      notices: self.notices.clone(),
    }
  }
}

impl<S: Store> CommentService<S> {
  pub fn new(
    store: Arc<S>,
    users: UserService<S>,
    feeds: FeedService<S>,
    notices: NoticeService<S>,
  ) -> Self {
    Self { store, users, feeds, notices }
  }

  /// Post a comment as member `user_id`, or anonymously when `None`.
  ///
  /// Exactly one of `user_id` and `request.password` must be given. A
  /// [`NoticeKind::Comment`] notice is emitted for the feed afterwards.
  pub async fn create_comment(
    &self,
    user_id: Option<i64>,
    request: CommentRequest,
  ) -> Result<Comment> {
    let (Some(content), Some(feed_id)) = (request.content, request.feed_id) else {
      return Err(Error::invalid("comment request requires content and feed id"));
    };
    let identity = Identity::exclusive(user_id, request.password)?;

    let feed = self.feeds.find_one_feed(feed_id).await?;
    let author = self.users.author_for(identity).await?;

    let comment = self
      .store
      .insert_comment(NewComment { feed_id: feed.id, content, author })
      .await
      .map_err(Error::store)?;
    debug!(comment_id = comment.id, feed_id = feed.id, "comment created");

    self
      .notices
      .create_notice(&feed, comment.id, NoticeKind::Comment)
      .await;
    Ok(comment)
  }

  pub async fn find_comment(&self, id: i64) -> Result<Comment> {
    let id = require_id(Some(id), "comment")?;
    resolve(&*self.store, id).await
  }

  /// Replace a comment's content. Authorship is not checked here.
  pub async fn update_comment(
    &self,
    id: i64,
    request: UpdateCommentRequest,
  ) -> Result<Comment> {
    let content = request
      .content
      .ok_or_else(|| Error::invalid("comment update requires content"))?;

    let mut comment = self.find_comment(id).await?;
    comment.set_content(content, Utc::now())?;
    self.store.save_comment(comment).await.map_err(Error::store)
  }

  /// Soft delete: the row stays, marked inactive with a deletion time.
  pub async fn delete_comment(&self, id: i64) -> Result<Comment> {
    let mut comment = self.find_comment(id).await?;
    comment.delete(Utc::now())?;
    let comment = self.store.save_comment(comment).await.map_err(Error::store)?;
    debug!(comment_id = comment.id, "comment deleted");
    Ok(comment)
  }

  /// Physically remove every comment and reply. Administrative use only.
  pub async fn delete_all(&self) -> Result<u64> {
    self.store.delete_all_comments().await.map_err(Error::store)
  }

  /// Every comment on a feed, whatever its status.
  pub async fn get_feed_all_comments(
    &self,
    page: PageRequest,
    feed_id: i64,
  ) -> Result<Page<Comment>> {
    self.feed_comments(page, feed_id, None).await
  }

  /// Active comments on a feed.
  pub async fn get_feed_all_active_comments(
    &self,
    page: PageRequest,
    feed_id: i64,
  ) -> Result<Page<Comment>> {
    self.feed_comments(page, feed_id, Some(Status::Active)).await
  }

  /// Active comments written by a member.
  pub async fn get_active_comments_by_user(
    &self,
    page: PageRequest,
    user_id: i64,
  ) -> Result<Page<Comment>> {
    require_page(page)?;
    let user = self.users.find_user(user_id).await?;
    self
      .store
      .list_comments_by_user(user.id, Some(Status::Active), page)
      .await
      .map_err(Error::store)
  }

  pub async fn get_feed_all_active_comments_count(&self, feed_id: i64) -> Result<u64> {
    let feed = self.feeds.find_one_feed(feed_id).await?;
    self
      .store
      .count_comments_by_feed(feed.id, Some(Status::Active))
      .await
      .map_err(Error::store)
  }

  async fn feed_comments(
    &self,
    page: PageRequest,
    feed_id: i64,
    status: Option<Status>,
  ) -> Result<Page<Comment>> {
    require_page(page)?;
    let feed = self.feeds.find_one_feed(feed_id).await?;
    self
      .store
      .list_comments_by_feed(feed.id, status, page)
      .await
      .map_err(Error::store)
  }
}

pub(crate) fn require_page(page: PageRequest) -> Result<()> {
  if !page.is_valid() {
    return Err(Error::invalid(format!(
      "page {} of size {} is out of range",
      page.page, page.size
    )));
  }
  Ok(())
}
