//! Replies to comments.

use std::sync::Arc;

use chrono::Utc;
use gloomy_core::{
  author::Identity,
  lifecycle::Status,
  notice::NoticeKind,
  page::{Page, PageRequest},
  reply::{NewReply, Reply},
  store::Store,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
  CommentService, Error, FeedService, NoticeService, Result, UserService,
  comment::require_page, require_id, resolve,
};

/// New-reply request. Unlike comments, the member id is part of the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyRequest {
  pub content:    Option<String>,
  pub feed_id:    Option<i64>,
  pub comment_id: Option<i64>,
  pub user_id:    Option<i64>,
  pub password:   Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReplyRequest {
  pub content: Option<String>,
}

pub struct ReplyService<S> {
  store:    Arc<S>,
  users:    UserService<S>,
  feeds:    FeedService<S>,
  comments: CommentService<S>,
  notices:  NoticeService<S>,
}

impl<S> Clone for ReplyService<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      users:    self.users.clone(),
      feeds:    self.feeds.clone(),
      comments: self.comments.clone(),
      notices:  self.notices.clone(),
    }
  }
}

impl<S: Store> ReplyService<S> {
  pub fn new(
    store: Arc<S>,
    users: UserService<S>,
    feeds: FeedService<S>,
    comments: CommentService<S>,
    notices: NoticeService<S>,
  ) -> Self {
    Self { store, users, feeds, comments, notices }
  }

  /// Reply to a comment as a member or anonymously.
  ///
  /// The comment must belong to the given feed. A [`NoticeKind::Reply`]
  /// notice is emitted for the feed afterwards.
  pub async fn create_reply(&self, request: ReplyRequest) -> Result<Reply> {
    let (content, feed_id, comment_id, identity) = validate_reply(request)?;

    let feed = self.feeds.find_one_feed(feed_id).await?;
    let comment = self.comments.find_comment(comment_id).await?;
    if comment.feed_id != feed.id {
      return Err(Error::invalid(format!(
        "comment {} does not belong to feed {}",
        comment.id, feed.id
      )));
    }
    let author = self.users.author_for(identity).await?;

    let reply = self
      .store
      .insert_reply(NewReply {
        feed_id: feed.id,
        comment_id: comment.id,
        content,
        author,
      })
      .await
      .map_err(Error::store)?;
    debug!(reply_id = reply.id, comment_id = comment.id, "reply created");

    self.notices.create_notice(&feed, reply.id, NoticeKind::Reply).await;
    Ok(reply)
  }

  pub async fn find_reply(&self, id: i64) -> Result<Reply> {
    let id = require_id(Some(id), "reply")?;
    resolve(&*self.store, id).await
  }

  pub async fn update_reply(&self, id: i64, request: UpdateReplyRequest) -> Result<Reply> {
    let content = request
      .content
      .filter(|c| !c.is_empty())
      .ok_or_else(|| Error::invalid("reply update requires content"))?;

    let mut reply = self.find_reply(id).await?;
    reply.set_content(content, Utc::now())?;
    self.store.save_reply(reply).await.map_err(Error::store)
  }

  /// Soft delete, mirroring [`CommentService::delete_comment`].
  pub async fn delete_reply(&self, id: i64) -> Result<Reply> {
    let mut reply = self.find_reply(id).await?;
    reply.delete(Utc::now())?;
    let reply = self.store.save_reply(reply).await.map_err(Error::store)?;
    debug!(reply_id = reply.id, "reply deleted");
    Ok(reply)
  }

  pub async fn get_comment_active_replies(
    &self,
    page: PageRequest,
    comment_id: i64,
  ) -> Result<Page<Reply>> {
    require_page(page)?;
    let comment = self.comments.find_comment(comment_id).await?;
    self
      .store
      .list_replies_by_comment(comment.id, Some(Status::Active), page)
      .await
      .map_err(Error::store)
  }

  /// Physically remove every reply. Administrative use only.
  pub async fn delete_all(&self) -> Result<u64> {
    self.store.delete_all_replies().await.map_err(Error::store)
  }
}

/// Checks that need no lookups: non-empty content, positive parent ids, and
/// exactly one usable identity.
fn validate_reply(request: ReplyRequest) -> Result<(String, i64, i64, Identity)> {
  let malformed = || Error::invalid("reply request is malformed");

  let content = request.content.filter(|c| !c.is_empty()).ok_or_else(malformed)?;
  let feed_id = require_id(request.feed_id, "feed").map_err(|_| malformed())?;
  let comment_id = require_id(request.comment_id, "comment").map_err(|_| malformed())?;

  let identity = match Identity::exclusive(request.user_id, request.password)? {
    Identity::Member(id) if id <= 0 => {
      return Err(Error::invalid("member reply has an invalid user id"));
    }
    Identity::Guest(pw) if pw.is_empty() => {
      return Err(Error::invalid("anonymous reply has an empty password"));
    }
    identity => identity,
  };

  Ok((content, feed_id, comment_id, identity))
}

#[cfg(test)]
mod tests {
  use gloomy_core::{author::Author, entity::EntityKind};

  use super::*;
  use crate::{
    comment::CommentRequest,
    password::verify_non_user,
    testing::{feed, member, services},
  };

  async fn comment_on(
    s: &crate::Services<gloomy_store_sqlite::SqliteStore>,
    feed_id: i64,
  ) -> i64 {
    s.comments
      .create_comment(None, CommentRequest {
        content:  Some("parent".into()),
        feed_id:  Some(feed_id),
        password: Some("pw".into()),
      })
      .await
      .unwrap()
      .id
  }

  fn request(feed_id: i64, comment_id: i64) -> ReplyRequest {
    ReplyRequest {
      content: Some("a reply".into()),
      feed_id: Some(feed_id),
      comment_id: Some(comment_id),
      ..Default::default()
    }
  }

  #[tokio::test]
  async fn member_and_guest_replies() {
    let s = services().await;
    let u = member(&s, "a@example.com").await;
    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;

    let mine = s
      .replies
      .create_reply(ReplyRequest { user_id: Some(u.id), ..request(f.id, c) })
      .await
      .unwrap();
    assert_eq!(mine.author, Author::Registered { user_id: u.id });
    assert_eq!(mine.comment_id, c);
    assert_eq!(s.replies.find_reply(mine.id).await.unwrap(), mine);

    let guest = s
      .replies
      .create_reply(ReplyRequest { password: Some("1234".into()), ..request(f.id, c) })
      .await
      .unwrap();
    assert_eq!(guest.author.user_id(), None);
    assert!(verify_non_user(guest.author.non_user().unwrap(), "1234"));
  }

  #[tokio::test]
  async fn reply_requires_exclusive_identity() {
    let s = services().await;
    let u = member(&s, "a@example.com").await;
    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;

    let both = ReplyRequest {
      user_id: Some(u.id),
      password: Some("1234".into()),
      ..request(f.id, c)
    };
    assert!(matches!(s.replies.create_reply(both).await, Err(Error::InvalidArgument(_))));
    assert!(matches!(
      s.replies.create_reply(request(f.id, c)).await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn reply_field_validation() {
    let s = services().await;
    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;
    let guest = |r: ReplyRequest| ReplyRequest { password: Some("pw".into()), ..r };

    for bad in [
      ReplyRequest { content: Some(String::new()), ..guest(request(f.id, c)) },
      ReplyRequest { feed_id: Some(0), ..guest(request(f.id, c)) },
      ReplyRequest { comment_id: None, ..guest(request(f.id, c)) },
      ReplyRequest { password: Some(String::new()), ..request(f.id, c) },
      ReplyRequest { user_id: Some(-2), ..request(f.id, c) },
    ] {
      assert!(matches!(
        s.replies.create_reply(bad).await,
        Err(Error::InvalidArgument(_))
      ));
    }
  }

  #[tokio::test]
  async fn reply_parents_must_exist_and_match() {
    let s = services().await;
    let f = feed(&s, None).await;
    let other = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;
    let guest = |r: ReplyRequest| ReplyRequest { password: Some("pw".into()), ..r };

    assert!(matches!(
      s.replies.create_reply(guest(request(f.id, 808))).await,
      Err(Error::NotFound { entity: EntityKind::Comment, id: 808 })
    ));
    assert!(matches!(
      s.replies.create_reply(guest(request(other.id, c))).await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn reply_notifies_feed_author() {
    let s = services().await;
    let owner = member(&s, "owner@example.com").await;
    let f = feed(&s, Some(owner.id)).await;
    let c = comment_on(&s, f.id).await;

    let r = s
      .replies
      .create_reply(ReplyRequest { password: Some("pw".into()), ..request(f.id, c) })
      .await
      .unwrap();

    let notices = s.notices.find_user_notices(owner.id).await.unwrap();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].kind, NoticeKind::Reply);
    assert_eq!(notices[0].source_id, r.id);
  }

  #[tokio::test]
  async fn soft_delete_and_active_listing() {
    let s = services().await;
    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;
    let guest = ReplyRequest { password: Some("pw".into()), ..request(f.id, c) };

    let first = s.replies.create_reply(guest.clone()).await.unwrap();
    s.replies.create_reply(guest).await.unwrap();

    let deleted = s.replies.delete_reply(first.id).await.unwrap();
    assert_eq!(deleted.lifecycle.status(), Status::Inactive);
    assert!(s.replies.find_reply(first.id).await.unwrap().lifecycle.deleted_at().is_some());

    let active = s
      .replies
      .get_comment_active_replies(PageRequest::default(), c)
      .await
      .unwrap();
    assert_eq!(active.total_elements, 1);
  }

  #[tokio::test]
  async fn update_reply_content() {
    let s = services().await;
    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;
    let r = s
      .replies
      .create_reply(ReplyRequest { password: Some("pw".into()), ..request(f.id, c) })
      .await
      .unwrap();

    let updated = s
      .replies
      .update_reply(r.id, UpdateReplyRequest { content: Some("changed".into()) })
      .await
      .unwrap();
    assert_eq!(updated.content, "changed");
    assert!(matches!(
      s.replies
        .update_reply(0, UpdateReplyRequest { content: Some("x".into()) })
        .await,
      Err(Error::InvalidArgument(_))
    ));

    s.replies.delete_reply(r.id).await.unwrap();
    assert!(matches!(
      s.replies
        .update_reply(r.id, UpdateReplyRequest { content: Some("again".into()) })
        .await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn find_reply_missing_and_delete_all() {
    let s = services().await;
    assert!(matches!(
      s.replies.find_reply(3).await,
      Err(Error::NotFound { entity: EntityKind::Reply, id: 3 })
    ));

    let f = feed(&s, None).await;
    let c = comment_on(&s, f.id).await;
    s.replies
      .create_reply(ReplyRequest { password: Some("pw".into()), ..request(f.id, c) })
      .await
      .unwrap();
    assert_eq!(s.replies.delete_all().await.unwrap(), 1);
  }
}
