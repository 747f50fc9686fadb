use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use kernel::model::id::UserId;
use shared::error::AppError;
use std::str::FromStr;

/// Caller identity, asserted upstream (gateway/session layer) and passed in
/// as the `x-user-id` header. Verification status and ownership checks
/// happen in the services; this extractor only identifies the caller.
pub struct AuthorizedUser {
    user_id: UserId,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::UnauthenticatedError("missing x-user-id header".into()))?;

        let user_id = UserId::from_str(header).map_err(|_| {
            AppError::UnauthenticatedError("x-user-id is not a valid user id".into())
        })?;

        Ok(Self { user_id })
    }
}
