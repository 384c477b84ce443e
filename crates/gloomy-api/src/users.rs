//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: `{"email":"..","name":".."}` |
//! | `GET`  | `/users/{id}` | 404 unless active |
//! | `GET`  | `/users/{id}/comments` | Active comments, `?page&size` |
//! | `GET`  | `/users/{id}/notices` | Newest first |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use gloomy_core::{notice::Notice, page::Page, store::Store, user::User};
use gloomy_service::{Services, user::UserRequest};

use crate::{error::ApiError, paging::PageParams, views::CommentView};

/// `POST /users`
pub async fn create<S: Store>(
  State(services): State<Services<S>>,
  Json(body): Json<UserRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let user = services.users.create_user(body).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn get_one<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
  Ok(Json(services.users.find_user(id).await?))
}

/// `GET /users/{id}/comments`
pub async fn comments<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
  Query(params): Query<PageParams>,
) -> Result<Json<Page<CommentView>>, ApiError> {
  let page = services
    .comments
    .get_active_comments_by_user(params.into(), id)
    .await?;
  Ok(Json(page.map(CommentView::from)))
}

/// `GET /users/{id}/notices`
pub async fn notices<S: Store>(
  State(services): State<Services<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Notice>>, ApiError> {
  Ok(Json(services.notices.find_user_notices(id).await?))
}
