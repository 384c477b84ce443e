//! Feeds, only as much as comments and replies need to hang off them.

use std::sync::Arc;

use gloomy_core::{
  author::Identity,
  feed::{Category, Feed, NewFeed},
  store::Store,
};
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result, UserService, require_id, resolve};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRequest {
  pub content:  Option<String>,
  pub category: Option<Category>,
  /// Set by anonymous posters only.
  pub password: Option<String>,
}

pub struct FeedService<S> {
  store: Arc<S>,
  users: UserService<S>,
}

impl<S> Clone for FeedService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), users: self.users.clone() }
  }
}

impl<S: Store> FeedService<S> {
  pub fn new(store: Arc<S>, users: UserService<S>) -> Self { Self { store, users } }

  /// Post a feed as the member `user_id` or, when `None`, anonymously with
  /// `request.password`.
  pub async fn create_feed(&self, user_id: Option<i64>, request: FeedRequest) -> Result<Feed> {
    let content = request
      .content
      .filter(|c| !c.trim().is_empty())
      .ok_or_else(|| Error::invalid("feed request requires content"))?;
    let category = request
      .category
      .ok_or_else(|| Error::invalid("feed request requires a category"))?;
    let identity = Identity::exclusive(user_id, request.password)?;

    let author = self.users.author_for(identity).await?;
    let feed = self
      .store
      .insert_feed(NewFeed { content, category, author })
      .await
      .map_err(Error::store)?;
    debug!(feed_id = feed.id, category = feed.category.code(), "feed created");
    Ok(feed)
  }

  pub async fn find_one_feed(&self, id: i64) -> Result<Feed> {
    let id = require_id(Some(id), "feed")?;
    resolve(&*self.store, id).await
  }
}

#[cfg(test)]
mod tests {
  use gloomy_core::{author::Author, entity::EntityKind};

  use super::*;
  use crate::testing::{member, services};

  #[tokio::test]
  async fn member_and_guest_feeds() {
    let s = services().await;
    let u = member(&s, "a@example.com").await;

    let mine = s
      .feeds
      .create_feed(Some(u.id), FeedRequest {
        content: Some("hello".into()),
        category: Some(Category::Family),
        password: None,
      })
      .await
      .unwrap();
    assert_eq!(mine.author, Author::Registered { user_id: u.id });

    let guest = s
      .feeds
      .create_feed(None, FeedRequest {
        content: Some("hello".into()),
        category: Some(Category::Friend),
        password: Some("pw".into()),
      })
      .await
      .unwrap();
    assert!(guest.author.non_user().is_some());

    assert_eq!(s.feeds.find_one_feed(mine.id).await.unwrap(), mine);
  }

  #[tokio::test]
  async fn feed_requires_exclusive_author() {
    let s = services().await;
    let u = member(&s, "a@example.com").await;
    let req = FeedRequest {
      content: Some("hello".into()),
      category: Some(Category::Chat),
      password: Some("pw".into()),
    };
    assert!(matches!(
      s.feeds.create_feed(Some(u.id), req).await,
      Err(Error::InvalidArgument(_))
    ));
    let req = FeedRequest {
      content: Some("hello".into()),
      category: Some(Category::Chat),
      password: None,
    };
    assert!(matches!(
      s.feeds.create_feed(None, req).await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn find_one_feed_errors() {
    let s = services().await;
    assert!(matches!(s.feeds.find_one_feed(0).await, Err(Error::InvalidArgument(_))));
    assert!(matches!(
      s.feeds.find_one_feed(9).await,
      Err(Error::NotFound { entity: EntityKind::Feed, id: 9 })
    ));
  }
}
