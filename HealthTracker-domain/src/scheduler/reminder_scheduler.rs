//! Reminder scheduler
//!
//! Reminders are held in memory for the lifetime of the process. A background
//! loop polls them on a fixed interval and asks the notifier to show every
//! reminder whose time falls within one minute of the current time.
//!
//! With the default 60s interval and 60s tolerance a reminder can be reported
//! on two consecutive ticks, or on none, depending on where the ticks land
//! relative to its minute. The loop does not track delivered reminders.

use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime, Timelike, Utc};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::entities::conversions;
use crate::entities::reminder::{parse_time_of_day, CreateReminderRequest, Reminder, ReminderKind};
use crate::scheduler::clock::Clock;
use crate::scheduler::notifier::{Notification, Notifier};
use crate::services::errors::{validate_request, ServiceError};

/// How close to its due time a reminder must be to fire
pub const REMINDER_TOLERANCE_MS: i64 = 60_000;

/// Default polling interval
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Scheduler settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl SchedulerConfig {
    /// Read `REMINDER_CHECK_SECS`, falling back to the default on missing or invalid values
    pub fn from_env() -> Self {
        let interval = env::var("REMINDER_CHECK_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CHECK_INTERVAL);

        Self { interval }
    }
}

/// The moment a reminder is due, relative to `now`
///
/// Medicine reminders recur daily, so they are due today. Appointments are due on
/// their own date.
pub fn due_time(reminder: &Reminder, now: NaiveDateTime) -> NaiveDateTime {
    let date = match (reminder.kind, reminder.date) {
        (ReminderKind::Appointment, Some(date)) => date,
        _ => now.date(),
    };

    let time = NaiveTime::from_hms_opt(reminder.time.hour(), reminder.time.minute(), 0)
        .unwrap_or(reminder.time);

    date.and_time(time)
}

/// Whether `now` is strictly within one minute of the reminder's due time
pub fn is_due(reminder: &Reminder, now: NaiveDateTime) -> bool {
    let delta = now - due_time(reminder, now);
    delta.num_milliseconds().abs() < REMINDER_TOLERANCE_MS
}

/// In-memory reminder list plus the polling loop that fires them
#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    reminders: Arc<Mutex<Vec<Reminder>>>,
    config: SchedulerConfig,
}

impl ReminderScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            reminders: Arc::new(Mutex::new(Vec::new())),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn validate_create_request(request: &CreateReminderRequest) -> Result<(), ServiceError> {
        validate_request(request)?;

        if let Some(time) = &request.time {
            if parse_time_of_day(time).is_none() {
                return Err(ServiceError::ValidationError(format!("time: Invalid time of day: {}", time)));
            }
        }

        if request.kind == Some(ReminderKind::Appointment) && request.date.is_none() {
            return Err(ServiceError::ValidationError(
                "date: Date is required for appointments".to_string(),
            ));
        }

        Ok(())
    }

    /// Add a reminder; its id is the creation time in epoch milliseconds
    pub fn add(&self, request: CreateReminderRequest) -> Result<Reminder, ServiceError> {
        Self::validate_create_request(&request)?;

        let mut reminders = self.reminders.lock()?;

        let mut id = Utc::now().timestamp_millis();
        while reminders.iter().any(|r| r.id == id.to_string()) {
            id += 1;
        }

        let reminder =
            conversions::convert_to_reminder(request, id.to_string()).map_err(ServiceError::ValidationError)?;

        info!(
            "Added {} reminder '{}' at {}",
            reminder.kind,
            reminder.title,
            reminder.time.format("%H:%M")
        );
        reminders.push(reminder.clone());
        Ok(reminder)
    }

    /// All reminders in insertion order
    pub fn reminders(&self) -> Result<Vec<Reminder>, ServiceError> {
        Ok(self.reminders.lock()?.clone())
    }

    /// Reminders due at `now`
    pub fn due_at(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, ServiceError> {
        let reminders = self.reminders.lock()?;
        Ok(reminders.iter().filter(|r| is_due(r, now)).cloned().collect())
    }

    /// Deliver a notification for every reminder due at `now`
    ///
    /// Returns how many notifications were delivered. Delivery failures are logged
    /// and not retried.
    pub async fn check(&self, notifier: &dyn Notifier, now: NaiveDateTime) -> Result<usize, ServiceError> {
        let due = self.due_at(now)?;
        let mut delivered = 0;

        for reminder in &due {
            match notifier.deliver(Notification::for_reminder(reminder)).await {
                Ok(()) => delivered += 1,
                Err(e) => error!("Failed to deliver reminder '{}': {}", reminder.title, e),
            }
        }

        if !due.is_empty() {
            debug!("Delivered {}/{} due reminders at {}", delivered, due.len(), now);
        }
        Ok(delivered)
    }

    /// Request notification permission, then poll on the configured interval
    ///
    /// If permission is not granted the loop exits without ever delivering.
    pub fn start(&self, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> SchedulerHandle {
        let scheduler = self.clone();
        let period = self.config.interval;
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        info!("Starting reminder scheduler every {:?}", period);
        let handle = tokio::spawn(async move {
            let permission = tokio::select! {
                permission = notifier.request_permission() => permission,
                _ = token.cancelled() => return,
            };

            if !permission.is_granted() {
                warn!("Notification permission {:?}; reminders will not be shown", permission);
                return;
            }

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = scheduler.check(notifier.as_ref(), clock.now()).await {
                            error!("Reminder check failed: {}", e);
                        }
                    }
                    _ = token.cancelled() => {
                        info!("Reminder scheduler shutting down");
                        break;
                    }
                }
            }
        });

        SchedulerHandle {
            handle: Some(handle),
            cancel_token,
        }
    }
}

/// Running reminder loop; dropping it cancels the loop
#[derive(Debug)]
pub struct SchedulerHandle {
    handle: Option<JoinHandle<()>>,
    cancel_token: CancellationToken,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Cancel the loop and wait for it to finish
    pub async fn stop(&mut self) {
        self.cancel_token.cancel();

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Reminder scheduler task failed to join: {}", e);
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::notifier::{MockNotifier, NotificationPermission, NotifyError};
    use crate::testing::{FixedClock, RecordingNotifier};
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn medicine_request(title: &str, time: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            kind: Some(ReminderKind::Medicine),
            title: Some(title.to_string()),
            time: Some(time.to_string()),
            date: None,
        }
    }

    fn appointment_request(title: &str, time: &str, day: u32) -> CreateReminderRequest {
        CreateReminderRequest {
            kind: Some(ReminderKind::Appointment),
            title: Some(title.to_string()),
            time: Some(time.to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, day),
        }
    }

    #[test]
    fn test_medicine_due_window() {
        let scheduler = ReminderScheduler::default();
        let reminder = scheduler.add(medicine_request("Metformin", "09:00")).unwrap();

        assert!(is_due(&reminder, at(5, 9, 0, 30)));
        assert!(is_due(&reminder, at(5, 8, 59, 30)));
        assert!(!is_due(&reminder, at(5, 9, 2, 0)));

        // Exactly one minute away is outside the window
        assert!(!is_due(&reminder, at(5, 9, 1, 0)));
        assert!(!is_due(&reminder, at(5, 8, 59, 0)));
    }

    #[test]
    fn test_medicine_recurs_daily() {
        let scheduler = ReminderScheduler::default();
        let reminder = scheduler.add(medicine_request("Metformin", "21:15")).unwrap();
        assert_eq!(reminder.date, None);

        assert!(is_due(&reminder, at(1, 21, 15, 10)));
        assert!(is_due(&reminder, at(20, 21, 15, 10)));
    }

    #[test]
    fn test_appointment_only_due_on_its_date() {
        let scheduler = ReminderScheduler::default();
        let reminder = scheduler.add(appointment_request("Cardiology", "14:30", 12)).unwrap();

        assert!(is_due(&reminder, at(12, 14, 30, 0)));
        assert!(!is_due(&reminder, at(11, 14, 30, 0)));
        assert!(!is_due(&reminder, at(13, 14, 30, 0)));
    }

    #[test]
    fn test_add_rejects_invalid_requests() {
        let scheduler = ReminderScheduler::default();

        let missing_title = CreateReminderRequest {
            title: None,
            ..medicine_request("", "09:00")
        };
        assert!(matches!(scheduler.add(missing_title), Err(ServiceError::ValidationError(_))));

        let bad_time = medicine_request("Metformin", "9 o'clock");
        assert!(matches!(scheduler.add(bad_time), Err(ServiceError::ValidationError(_))));

        let no_date = CreateReminderRequest {
            date: None,
            ..appointment_request("Dentist", "10:00", 1)
        };
        match scheduler.add(no_date) {
            Err(ServiceError::ValidationError(msg)) => assert!(msg.contains("date")),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(scheduler.reminders().unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let scheduler = ReminderScheduler::default();
        let first = scheduler.add(medicine_request("A", "08:00")).unwrap();
        let second = scheduler.add(medicine_request("B", "08:00")).unwrap();
        let third = scheduler.add(medicine_request("C", "08:00")).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert!(first.id.parse::<i64>().is_ok());
        assert_eq!(scheduler.reminders().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_check_delivers_due_reminders() {
        let scheduler = ReminderScheduler::default();
        scheduler.add(medicine_request("Metformin", "09:00")).unwrap();
        scheduler.add(medicine_request("Statin", "21:00")).unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_deliver()
            .withf(|n| n.title == "Metformin" && n.body == "It's time for your medicine!")
            .times(1)
            .returning(|_| Ok(()));

        let delivered = scheduler.check(&notifier, at(5, 9, 0, 30)).await.unwrap();
        assert_eq!(delivered, 1);
    }

    #[tokio::test]
    async fn test_check_logs_delivery_failures() {
        let scheduler = ReminderScheduler::default();
        scheduler.add(medicine_request("Metformin", "09:00")).unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_deliver()
            .times(1)
            .returning(|_| Err(NotifyError::DeliveryFailed("host unavailable".to_string())));

        let delivered = scheduler.check(&notifier, at(5, 9, 0, 0)).await.unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_permission_never_delivers() {
        let scheduler = ReminderScheduler::default();
        scheduler.add(medicine_request("Metformin", "09:00")).unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_request_permission()
            .times(1)
            .returning(|| NotificationPermission::Denied);
        notifier.expect_deliver().times(0);

        let clock = Arc::new(FixedClock::new(at(5, 9, 0, 0)));
        let mut handle = scheduler.start(Arc::new(notifier), clock);

        tokio::time::sleep(Duration::from_secs(180)).await;
        assert!(!handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_loop() {
        let scheduler = ReminderScheduler::default();
        scheduler.add(medicine_request("Metformin", "09:00")).unwrap();

        let notifier = Arc::new(RecordingNotifier::granted());
        let clock = Arc::new(FixedClock::new(at(5, 9, 0, 10)));
        let handle = scheduler.start(notifier.clone(), clock);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(notifier.delivered().len(), 1);

        drop(handle);

        // The clock stays on the due minute, so a live loop would keep delivering
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(notifier.delivered().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_polls_on_interval() {
        let scheduler = ReminderScheduler::default();
        scheduler.add(medicine_request("Metformin", "09:00")).unwrap();

        let notifier = Arc::new(RecordingNotifier::granted());
        let clock = Arc::new(FixedClock::new(at(5, 8, 50, 0)));
        let mut handle = scheduler.start(notifier.clone(), clock.clone());

        // First tick at 08:50 finds nothing
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(notifier.delivered().is_empty());

        clock.set(at(5, 9, 0, 20));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(notifier.delivered().len(), 1);
        assert_eq!(notifier.delivered()[0].title, "Metformin");
        assert_eq!(notifier.permission_requests(), 1);

        handle.stop().await;
        assert!(!handle.is_running());

        clock.set(at(6, 9, 0, 0));
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(notifier.delivered().len(), 1);
    }
}
