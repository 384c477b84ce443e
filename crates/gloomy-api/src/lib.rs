//! JSON REST API for the gloomy feed backend.
//!
//! Exposes an axum [`Router`] over [`Services`] backed by any
//! [`Store`]. Session authentication, TLS and transport concerns are the
//! caller's responsibility; the authenticated member arrives as the
//! [`caller::USER_ID_HEADER`] header.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gloomy_api::api_router(services.clone()))
//! ```

pub mod caller;
pub mod comments;
pub mod error;
pub mod feeds;
pub mod paging;
pub mod replies;
pub mod users;
pub mod views;

use axum::{
  Router,
  routing::{get, post},
};
use gloomy_core::store::Store;
use gloomy_service::Services;

pub use error::ApiError;

/// Build a fully-materialised API router over `services`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(services: Services<S>) -> Router<()>
where
  S: Store + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/users/{id}/comments", get(users::comments::<S>))
    .route("/users/{id}/notices", get(users::notices::<S>))
    // Feeds
    .route("/feeds", post(feeds::create::<S>))
    .route("/feeds/{id}", get(feeds::get_one::<S>))
    .route("/feeds/{id}/comments", get(feeds::comments::<S>))
    .route("/feeds/{id}/comments/count", get(feeds::comment_count::<S>))
    // Comments
    .route("/comments", post(comments::create::<S>))
    .route(
      "/comments/{id}",
      get(comments::get_one::<S>)
        .patch(comments::update::<S>)
        .delete(comments::delete::<S>),
    )
    .route("/comments/{id}/replies", get(comments::replies::<S>))
    // Replies
    .route("/replies", post(replies::create::<S>))
    .route(
      "/replies/{id}",
      get(replies::get_one::<S>)
        .patch(replies::update::<S>)
        .delete(replies::delete::<S>),
    )
    .with_state(services)
}
