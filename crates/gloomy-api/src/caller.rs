//! Caller identity extractor.
//!
//! Session authentication happens upstream; the gateway forwards the
//! authenticated member's id in [`USER_ID_HEADER`]. No header means the
//! caller is anonymous.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated member's id, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Option<i64>);

impl<St> FromRequestParts<St> for Caller
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
      return Ok(Caller(None));
    };
    let id = value
      .to_str()
      .ok()
      .and_then(|s| s.trim().parse::<i64>().ok())
      .ok_or_else(|| ApiError::BadRequest(format!("malformed {USER_ID_HEADER} header")))?;
    Ok(Caller(Some(id)))
  }
}

#[cfg(test)]
mod tests {
  use axum::http::Request;

  use super::*;

  async fn extract(req: Request<()>) -> Result<Caller, ApiError> {
    let (mut parts, _) = req.into_parts();
    Caller::from_request_parts(&mut parts, &()).await
  }

  #[tokio::test]
  async fn missing_header_is_anonymous() {
    let req = Request::builder().body(()).unwrap();
    assert_eq!(extract(req).await.unwrap(), Caller(None));
  }

  #[tokio::test]
  async fn numeric_header_is_member() {
    let req = Request::builder().header(USER_ID_HEADER, "42").body(()).unwrap();
    assert_eq!(extract(req).await.unwrap(), Caller(Some(42)));
  }

  #[tokio::test]
  async fn garbage_header_is_rejected() {
    let req = Request::builder().header(USER_ID_HEADER, "bob").body(()).unwrap();
    assert!(matches!(extract(req).await, Err(ApiError::BadRequest(_))));
  }
}
