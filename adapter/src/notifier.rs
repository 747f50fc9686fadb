use async_trait::async_trait;
use kernel::model::id::UserId;
use kernel::repository::notifier::NotificationSink;
use shared::{
    config::NotifierConfig,
    error::{AppError, AppResult},
};

/// Posts notifications to a configured webhook. Without a configured URL
/// the message is only logged, which is enough for development.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(cfg: &NotifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: cfg.webhook_url.clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn notify(&self, user_id: UserId, message: &str) -> AppResult<()> {
        let Some(url) = &self.webhook_url else {
            tracing::info!(%user_id, message, "notification (no webhook configured)");
            return Ok(());
        };

        self.client
            .post(url)
            .json(&serde_json::json!({
                "user_id": user_id,
                "message": message,
            }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::NotificationDeliveryError(e.to_string()))?;

        Ok(())
    }
}
