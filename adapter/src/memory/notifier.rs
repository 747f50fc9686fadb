use async_trait::async_trait;
use kernel::model::id::UserId;
use kernel::repository::notifier::NotificationSink;
use shared::error::{AppError, AppResult};
use std::sync::Mutex;

/// Records every notification for later inspection. Construct with
/// [`RecordingNotifier::failing`] to simulate a broken delivery channel.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn notify(&self, user_id: UserId, message: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::NotificationDeliveryError(
                "recording notifier configured to fail".into(),
            ));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((user_id, message.to_string()));
        Ok(())
    }
}
