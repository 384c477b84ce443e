//! Application services for the gloomy feed backend.
//!
//! Each service validates a request, resolves the records it refers to
//! through [`resolve`], builds the new record with a validated [`Author`]
//! and hands it to the store. Services are generic over any
//! [`Store`](gloomy_core::store::Store) and cheap to clone.
//!
//! [`Author`]: gloomy_core::author::Author

pub mod comment;
pub mod error;
pub mod feed;
pub mod notice;
pub mod password;
pub mod reply;
pub mod resolve;
pub mod user;

use std::sync::Arc;

use gloomy_core::store::Store;

pub use comment::CommentService;
pub use error::{Error, Result};
pub use feed::FeedService;
pub use notice::NoticeService;
pub use reply::ReplyService;
pub use resolve::resolve;
pub use user::UserService;

/// Every service wired against one shared store.
pub struct Services<S> {
  pub users:    UserService<S>,
  pub feeds:    FeedService<S>,
  pub comments: CommentService<S>,
  pub replies:  ReplyService<S>,
  pub notices:  NoticeService<S>,
}

impl<S: Store> Services<S> {
  pub fn new(store: Arc<S>) -> Self {
    let users = UserService::new(store.clone());
    let feeds = FeedService::new(store.clone(), users.clone());
    let notices = NoticeService::new(store.clone(), users.clone());
    let comments = CommentService::new(
      store.clone(),
      users.clone(),
      feeds.clone(),
      notices.clone(),
    );
    let replies = ReplyService::new(
      store,
      users.clone(),
      feeds.clone(),
      comments.clone(),
      notices.clone(),
    );
    Self { users, feeds, comments, replies, notices }
  }
}

impl<S> Clone for Services<S> {
  fn clone(&self) -> Self {
    Self {
      users:    self.users.clone(),
      feeds:    self.feeds.clone(),
      comments: self.comments.clone(),
      replies:  self.replies.clone(),
      notices:  self.notices.clone(),
    }
  }
}

/// Reject missing or non-positive ids.
pub(crate) fn require_id(id: Option<i64>, what: &str) -> Result<i64> {
  match id {
    Some(id) if id > 0 => Ok(id),
    _ => Err(Error::InvalidArgument(format!("{what} id is invalid"))),
  }
}
