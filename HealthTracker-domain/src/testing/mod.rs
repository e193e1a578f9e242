// Test doubles for the scheduler seams, shared with other crates through the `mock` feature
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::scheduler::clock::Clock;
use crate::scheduler::notifier::{Notification, NotificationPermission, Notifier, NotifyError};

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Notifier that answers permission requests with a fixed value and keeps every delivery
#[derive(Debug)]
pub struct RecordingNotifier {
    permission: NotificationPermission,
    permission_requests: AtomicUsize,
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission,
            permission_requests: AtomicUsize::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::new(NotificationPermission::Granted)
    }

    pub fn denied() -> Self {
        Self::new(NotificationPermission::Denied)
    }

    pub fn delivered(&self) -> Vec<Notification> {
        match self.delivered.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn request_permission(&self) -> NotificationPermission {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.permission
    }

    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError> {
        if !self.permission.is_granted() {
            return Err(NotifyError::PermissionDenied);
        }

        self.delivered
            .lock()
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?
            .push(notification);
        Ok(())
    }
}
