//! Handlers for `/feeds` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/feeds` | `X-User-Id` or body `password`, not both |
//! | `GET`  | `/feeds/{id}` | 404 if not found |
//! | `GET`  | `/feeds/{id}/comments` | `?page&size&active` (active defaults to true) |
//! | `GET`  | `/feeds/{id}/comments/count` | Active comments only |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use gloomy_core::{page::Page, store::Store};
use gloomy_service::{Services, feed::FeedRequest};
use serde::{Deserialize, Serialize};

use crate::{
  caller::Caller,
  error::ApiError,
  paging::PageParams,
  views::{CommentView, FeedView},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /feeds`
pub async fn create<S: Store>(
  State(services): State<Services<S>>,
  Caller(user_id): Caller,
  Json(body): Json<FeedRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let feed = services.feeds.create_feed(user_id, body).await?;
  Ok((StatusCode::CREATED, Json(FeedView::from(feed))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /feeds/{id}`
pub async fn get_one<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<FeedView>, ApiError> {
  Ok(Json(services.feeds.find_one_feed(id).await?.into()))
}

// ─── Comments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentsParams {
  pub page:   Option<u32>,
  pub size:   Option<u32>,
  pub active: Option<bool>,
}

/// `GET /feeds/{id}/comments[?page=&size=&active=false]`
pub async fn comments<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
  Query(params): Query<CommentsParams>,
) -> Result<Json<Page<CommentView>>, ApiError> {
  let request = PageParams { page: params.page, size: params.size }.into();
  let page = if params.active.unwrap_or(true) {
    services.comments.get_feed_all_active_comments(request, id).await?
  } else {
    services.comments.get_feed_all_comments(request, id).await?
  };
  Ok(Json(page.map(CommentView::from)))
}

#[derive(Debug, Serialize)]
pub struct CountBody {
  pub count: u64,
}

/// `GET /feeds/{id}/comments/count`
pub async fn comment_count<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<CountBody>, ApiError> {
  let count = services.comments.get_feed_all_active_comments_count(id).await?;
  Ok(Json(CountBody { count }))
}
