use crate::model::id::UserId;
use async_trait::async_trait;
use shared::error::AppResult;

/// External identity provider. Verification itself (document checks and so
/// on) happens elsewhere; the core only consumes the verdict.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn is_verified(&self, user_id: UserId) -> AppResult<bool>;
}
