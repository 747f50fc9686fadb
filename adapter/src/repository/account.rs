use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::UserId;
use kernel::repository::account::AccountProvider;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AccountProviderImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AccountProvider for AccountProviderImpl {
    // Unknown users count as unverified.
    async fn is_verified(&self, user_id: UserId) -> AppResult<bool> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT verified FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(|(verified,)| verified).unwrap_or(false))
    }
}
