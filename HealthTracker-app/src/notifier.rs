use async_trait::async_trait;
use tracing::info;

use health_tracker_domain::scheduler::{Notification, NotificationPermission, Notifier, NotifyError};

/// Notifier that writes reminders to the log
#[derive(Debug, Clone)]
pub struct LogNotifier {
    enabled: bool,
}

impl LogNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn request_permission(&self) -> NotificationPermission {
        if self.enabled {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }

    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError> {
        if !self.enabled {
            return Err(NotifyError::PermissionDenied);
        }

        info!(icon = %notification.icon, "🔔 {}: {}", notification.title, notification.body);
        Ok(())
    }
}
