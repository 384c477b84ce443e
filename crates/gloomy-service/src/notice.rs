//! Notices: side-effect records telling a feed's author about new activity.

use std::sync::Arc;

use gloomy_core::{
  feed::Feed,
  notice::{NewNotice, Notice, NoticeKind},
  store::Store,
};
use tracing::{debug, warn};

use crate::{Error, Result, UserService};

pub struct NoticeService<S> {
  store: Arc<S>,
  users: UserService<S>,
}

impl<S> Clone for NoticeService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), users: self.users.clone() }
  }
}

impl<S: Store> NoticeService<S> {
  pub fn new(store: Arc<S>, users: UserService<S>) -> Self { Self { store, users } }

  /// Record that `source_id` (a comment or reply, per `kind`) landed on
  /// `feed`. Fire-and-forget: a failure is logged and swallowed.
  pub async fn create_notice(
    &self,
    feed: &Feed,
    source_id: i64,
    kind: NoticeKind,
  ) -> Option<Notice> {
    let input = NewNotice {
      feed_id: feed.id,
      recipient_id: feed.author.user_id(),
      kind,
      source_id,
    };
    match self.store.insert_notice(input).await {
      Ok(notice) => {
        debug!(notice_id = notice.id, feed_id = feed.id, kind = kind.as_str(), "notice recorded");
        Some(notice)
      }
      Err(e) => {
        warn!(feed_id = feed.id, source_id, error = %e, "failed to record notice");
        None
      }
    }
  }

  /// Notices addressed to a joined user, newest first.
  pub async fn find_user_notices(&self, user_id: i64) -> Result<Vec<Notice>> {
    let user = self.users.find_user(user_id).await?;
    self
      .store
      .list_notices_for(user.id)
      .await
      .map_err(Error::store)
  }
}
