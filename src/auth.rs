//! Identity boundary.
//!
//! Authentication is an external collaborator: this service only needs the
//! caller's identity for order ownership. [`AuthUser`] extracts it from the
//! `X-User-Id` header, which an upstream gateway or identity provider is
//! expected to set after authenticating the request. Requests without a
//! valid identity are rejected with 401.

use crate::error::AppError;
use crate::types::UserId;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the authenticated caller's UUID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, as asserted by the upstream identity provider.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized("missing X-User-Id header"))?;

        let raw = header
            .to_str()
            .map_err(|_| AppError::unauthorized("X-User-Id header is not valid UTF-8"))?;

        let uuid = Uuid::parse_str(raw)
            .map_err(|_| AppError::unauthorized("X-User-Id header is not a valid UUID"))?;

        Ok(Self(UserId::from_uuid(uuid)))
    }
}
