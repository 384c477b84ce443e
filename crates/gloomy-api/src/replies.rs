//! Handlers for `/replies` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/replies` | Body: `{"content","feed_id","comment_id","password"?}` |
//! | `GET`    | `/replies/{id}` | |
//! | `PATCH`  | `/replies/{id}` | Body: `{"content":".."}` |
//! | `DELETE` | `/replies/{id}` | Soft delete |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gloomy_core::store::Store;
use gloomy_service::{
  Services,
  reply::{ReplyRequest, UpdateReplyRequest},
};
use serde::Deserialize;

use crate::{caller::Caller, error::ApiError, views::ReplyView};

/// The member id comes from [`Caller`], never from the body.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub content:    Option<String>,
  pub feed_id:    Option<i64>,
  pub comment_id: Option<i64>,
  pub password:   Option<String>,
}

/// `POST /replies`
pub async fn create<S: Store>(
  State(services): State<Services<S>>,
  Caller(user_id): Caller,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let request = ReplyRequest {
    content: body.content,
    feed_id: body.feed_id,
    comment_id: body.comment_id,
    user_id,
    password: body.password,
  };
  let reply = services.replies.create_reply(request).await?;
  Ok((StatusCode::CREATED, Json(ReplyView::from(reply))))
}

/// `GET /replies/{id}`
pub async fn get_one<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ReplyView>, ApiError> {
  Ok(Json(services.replies.find_reply(id).await?.into()))
}

/// `PATCH /replies/{id}`
pub async fn update<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateReplyRequest>,
) -> Result<Json<ReplyView>, ApiError> {
  Ok(Json(services.replies.update_reply(id, body).await?.into()))
}

/// `DELETE /replies/{id}`
pub async fn delete<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ReplyView>, ApiError> {
  Ok(Json(services.replies.delete_reply(id).await?.into()))
}
