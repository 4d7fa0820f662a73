//! Query-string extractor whose rejection is an [`ApiError`].

use axum::{
  extract::{FromRequestParts, Query},
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`Query`], but a malformed query string (an unknown enum token, a
/// non-numeric page) is answered with the JSON `{"error": ...}` body every
/// other failure uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Query(value) = Query::<T>::from_request_parts(parts, state)
      .await
      .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Self(value))
  }
}
