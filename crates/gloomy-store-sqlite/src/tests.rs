//! Integration tests for `SqliteStore` against an in-memory database.

use gloomy_core::{
  author::{Author, NonUser},
  comment::{Comment, NewComment},
  feed::{Category, Feed, NewFeed},
  lifecycle::Status,
  notice::{NewNotice, NoticeKind},
  page::PageRequest,
  reply::{NewReply, Reply},
  store::{Lookup, Repository},
  user::{NewUser, User},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn user(s: &SqliteStore, email: &str) -> User {
  s.insert_user(NewUser { email: email.into(), name: "tester".into() })
    .await
    .unwrap()
}

async fn feed(s: &SqliteStore, author: Author) -> Feed {
  s.insert_feed(NewFeed {
    content:  "a confession".into(),
    category: Category::Chat,
    author,
  })
  .await
  .unwrap()
}

fn anonymous() -> Author {
  Author::Anonymous(NonUser::anonymous("$argon2id$fake"))
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_lookup_user() {
  let s = store().await;
  let u = user(&s, "a@example.com").await;
  assert_eq!(u.join_status, Status::Active);

  let fetched = Lookup::<User>::lookup(&s, u.id).await.unwrap();
  assert_eq!(fetched, Some(u.clone()));

  let by_email = s.find_user_by_email("a@example.com").await.unwrap();
  assert_eq!(by_email.map(|u| u.id), Some(u.id));
  assert!(s.find_user_by_email("b@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn set_join_status_persists() {
  let s = store().await;
  let u = user(&s, "a@example.com").await;
  s.set_join_status(u.id, Status::Inactive).await.unwrap();

  let fetched = Lookup::<User>::lookup(&s, u.id).await.unwrap().unwrap();
  assert_eq!(fetched.join_status, Status::Inactive);

  assert!(matches!(
    s.set_join_status(999, Status::Inactive).await,
    Err(Error::NotFound(_, 999))
  ));
}

#[tokio::test]
async fn lookup_missing_returns_none() {
  let s = store().await;
  let u = Lookup::<User>::lookup(&s, 42).await.unwrap();
  let f = Lookup::<Feed>::lookup(&s, 42).await.unwrap();
  let r = Lookup::<Reply>::lookup(&s, 42).await.unwrap();
  assert!(u.is_none() && f.is_none() && r.is_none());
}

// ─── Feeds ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn feed_author_roundtrip() {
  let s = store().await;
  let u = user(&s, "a@example.com").await;

  let member = feed(&s, Author::Registered { user_id: u.id }).await;
  let guest = feed(&s, anonymous()).await;

  let fetched = Lookup::<Feed>::lookup(&s, member.id).await.unwrap().unwrap();
  assert_eq!(fetched, member);
  assert_eq!(fetched.category, Category::Chat);

  let fetched = Lookup::<Feed>::lookup(&s, guest.id).await.unwrap().unwrap();
  assert_eq!(fetched.author, anonymous());
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_comment_persists_soft_delete() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;

  let mut c = s
    .insert_comment(NewComment {
      feed_id: f.id,
      content: "hi".into(),
      author:  anonymous(),
    })
    .await
    .unwrap();
  c.delete(chrono::Utc::now()).unwrap();
  s.save_comment(c.clone()).await.unwrap();

  let fetched = Lookup::<Comment>::lookup(&s, c.id).await.unwrap().unwrap();
  assert_eq!(fetched.lifecycle.status(), Status::Inactive);
  assert!(fetched.lifecycle.deleted_at().is_some());
  assert_eq!(fetched, c);
}

#[tokio::test]
async fn list_and_count_comments_by_status() {
  let s = store().await;
  let u = user(&s, "a@example.com").await;
  let f = feed(&s, anonymous()).await;
  let other = feed(&s, anonymous()).await;

  let mut ids = Vec::new();
  for i in 0..4 {
    let c = s
      .insert_comment(NewComment {
        feed_id: f.id,
        content: format!("comment {i}"),
        author:  Author::Registered { user_id: u.id },
      })
      .await
      .unwrap();
    ids.push(c);
  }
  s.insert_comment(NewComment {
    feed_id: other.id,
    content: "elsewhere".into(),
    author:  anonymous(),
  })
  .await
  .unwrap();

  let mut gone = ids[1].clone();
  gone.delete(chrono::Utc::now()).unwrap();
  s.save_comment(gone).await.unwrap();

  let all = s
    .list_comments_by_feed(f.id, None, PageRequest::default())
    .await
    .unwrap();
  assert_eq!(all.total_elements, 4);
  assert_eq!(all.content.len(), 4);

  let active = s
    .list_comments_by_feed(f.id, Some(Status::Active), PageRequest::default())
    .await
    .unwrap();
  assert_eq!(active.total_elements, 3);
  assert!(active.content.iter().all(|c| c.lifecycle.is_active()));

  assert_eq!(s.count_comments_by_feed(f.id, Some(Status::Active)).await.unwrap(), 3);
  assert_eq!(s.count_comments_by_feed(f.id, None).await.unwrap(), 4);

  let by_user = s
    .list_comments_by_user(u.id, Some(Status::Active), PageRequest::default())
    .await
    .unwrap();
  assert_eq!(by_user.total_elements, 3);
  // Newest first.
  assert_eq!(by_user.content[0].id, ids[3].id);
}

#[tokio::test]
async fn comment_pages_are_sliced() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;
  for i in 0..5 {
    s.insert_comment(NewComment {
      feed_id: f.id,
      content: format!("c{i}"),
      author:  anonymous(),
    })
    .await
    .unwrap();
  }

  let second = s
    .list_comments_by_feed(f.id, None, PageRequest::new(1, 2))
    .await
    .unwrap();
  assert_eq!(second.total_elements, 5);
  assert_eq!(second.total_pages(), 3);
  let contents: Vec<_> = second.content.iter().map(|c| c.content.as_str()).collect();
  assert_eq!(contents, ["c2", "c3"]);
}

#[tokio::test]
async fn huge_page_reads_past_the_end() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;
  s.insert_comment(NewComment {
    feed_id: f.id,
    content: "first".into(),
    author:  anonymous(),
  })
  .await
  .unwrap();

  let page = s
    .list_comments_by_feed(f.id, None, PageRequest::new(u32::MAX, u32::MAX))
    .await
    .unwrap();
  assert_eq!(page.total_elements, 1);
  assert!(page.content.is_empty());
}

#[tokio::test]
async fn save_missing_comment_fails() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;
  let mut c = s
    .insert_comment(NewComment {
      feed_id: f.id,
      content: "hi".into(),
      author:  anonymous(),
    })
    .await
    .unwrap();
  c.id = 999;
  assert!(matches!(s.save_comment(c).await, Err(Error::NotFound(_, 999))));
}

// ─── Replies ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replies_cascade_on_bulk_comment_delete() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;
  let c = s
    .insert_comment(NewComment {
      feed_id: f.id,
      content: "parent".into(),
      author:  anonymous(),
    })
    .await
    .unwrap();
  let r = s
    .insert_reply(NewReply {
      feed_id:    f.id,
      comment_id: c.id,
      content:    "child".into(),
      author:     anonymous(),
    })
    .await
    .unwrap();

  let fetched = Lookup::<Reply>::lookup(&s, r.id).await.unwrap().unwrap();
  assert_eq!(fetched, r);

  assert_eq!(s.delete_all_comments().await.unwrap(), 1);
  let gone = Lookup::<Reply>::lookup(&s, r.id).await.unwrap();
  assert!(gone.is_none());
}

#[tokio::test]
async fn list_replies_filters_status() {
  let s = store().await;
  let f = feed(&s, anonymous()).await;
  let c = s
    .insert_comment(NewComment {
      feed_id: f.id,
      content: "parent".into(),
      author:  anonymous(),
    })
    .await
    .unwrap();

  let mut first = None;
  for i in 0..3 {
    let r = s
      .insert_reply(NewReply {
        feed_id:    f.id,
        comment_id: c.id,
        content:    format!("r{i}"),
        author:     anonymous(),
      })
      .await
      .unwrap();
    first.get_or_insert(r);
  }

  let mut r = first.unwrap();
  r.delete(chrono::Utc::now()).unwrap();
  s.save_reply(r).await.unwrap();

  let active = s
    .list_replies_by_comment(c.id, Some(Status::Active), PageRequest::default())
    .await
    .unwrap();
  assert_eq!(active.total_elements, 2);

  assert_eq!(s.delete_all_replies().await.unwrap(), 3);
}

// ─── Notices ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn notices_listed_newest_first() {
  let s = store().await;
  let u = user(&s, "a@example.com").await;
  let f = feed(&s, Author::Registered { user_id: u.id }).await;

  for source_id in [1, 2] {
    s.insert_notice(NewNotice {
      feed_id: f.id,
      recipient_id: Some(u.id),
      kind: NoticeKind::Comment,
      source_id,
    })
    .await
    .unwrap();
  }

  let notices = s.list_notices_for(u.id).await.unwrap();
  assert_eq!(notices.len(), 2);
  assert_eq!(notices[0].source_id, 2);
  assert!(notices.iter().all(|n| !n.is_read && n.kind == NoticeKind::Comment));
}
