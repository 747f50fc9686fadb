use async_trait::async_trait;
use kernel::model::id::UserId;
use kernel::repository::account::AccountProvider;
use shared::error::AppResult;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAccountProvider {
    verified: RwLock<HashSet<UserId>>,
}

impl InMemoryAccountProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_verified(&self, user_id: UserId, verified: bool) {
        let mut set = self.verified.write().unwrap_or_else(|e| e.into_inner());
        if verified {
            set.insert(user_id);
        } else {
            set.remove(&user_id);
        }
    }
}

#[async_trait]
impl AccountProvider for InMemoryAccountProvider {
    async fn is_verified(&self, user_id: UserId) -> AppResult<bool> {
        let set = self.verified.read().unwrap_or_else(|e| e.into_inner());
        Ok(set.contains(&user_id))
    }
}
