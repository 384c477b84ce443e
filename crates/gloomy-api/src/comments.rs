//! Handlers for `/comments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/comments` | Body: `{"content","feed_id","password"?}` |
//! | `GET`    | `/comments/{id}` | Inactive comments are still returned |
//! | `PATCH`  | `/comments/{id}` | Body: `{"content":".."}` |
//! | `DELETE` | `/comments/{id}` | Soft delete; returns the inactive comment |
//! | `GET`    | `/comments/{id}/replies` | Active replies, `?page&size` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use gloomy_core::{page::Page, store::Store};
use gloomy_service::{
  Services,
  comment::{CommentRequest, UpdateCommentRequest},
};

use crate::{
  caller::Caller,
  error::ApiError,
  paging::PageParams,
  views::{CommentView, ReplyView},
};

/// `POST /comments`
pub async fn create<S: Store>(
  State(services): State<Services<S>>,
  Caller(user_id): Caller,
  Json(body): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let comment = services.comments.create_comment(user_id, body).await?;
  Ok((StatusCode::CREATED, Json(CommentView::from(comment))))
}

/// `GET /comments/{id}`
pub async fn get_one<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<CommentView>, ApiError> {
  Ok(Json(services.comments.find_comment(id).await?.into()))
}

/// `PATCH /comments/{id}`
pub async fn update<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateCommentRequest>,
) -> Result<Json<CommentView>, ApiError> {
  Ok(Json(services.comments.update_comment(id, body).await?.into()))
}

/// `DELETE /comments/{id}`
pub async fn delete<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<CommentView>, ApiError> {
  Ok(Json(services.comments.delete_comment(id).await?.into()))
}

/// `GET /comments/{id}/replies`
pub async fn replies<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<ReplyView>>, ApiError> {
  let page = services
    .replies
    .get_comment_active_replies(params.into(), id)
    .await?;
  Ok(Json(page.map(ReplyView::from)))
}
