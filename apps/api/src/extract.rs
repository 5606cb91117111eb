//! Request extractors.
//!
//! The acting user arrives in the `X-Sharer-User-Id` header. The JSON, query
//! and path wrappers only swap axum's plain-text rejections for [`ApiError`]
//! so malformed input gets the same `{code, message}` body as everything else.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::Json;
use shareit_core::validation::parse_user_id;
use shareit_core::ValidationError;

use crate::error::ApiError;

/// Header carrying the id of the user performing the request.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// The user performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub i64);

impl ActingUser {
    pub fn id(&self) -> i64 {
        self.0
    }
}

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ValidationError::Required {
                field: USER_ID_HEADER.to_string(),
            })?
            .to_str()
            .map_err(|_| ValidationError::InvalidFormat {
                field: USER_ID_HEADER.to_string(),
                reason: "must be visible ASCII".to_string(),
            })?;

        Ok(ActingUser(parse_user_id(raw)?))
    }
}

/// `axum::Json` with an [`ApiError`] rejection.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// `axum::extract::Path` with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
