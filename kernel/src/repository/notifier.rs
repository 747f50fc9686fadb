use crate::model::id::UserId;
use async_trait::async_trait;
use shared::error::AppResult;

/// Fire-and-forget notification sink. Delivery is best effort; callers must
/// never let a failure here propagate into a booking outcome.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, user_id: UserId, message: &str) -> AppResult<()>;
}
