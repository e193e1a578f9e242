// Reminder polling: clocks, notification delivery and the scheduler loop
pub mod clock;
pub mod notifier;
pub mod reminder_scheduler;

pub use clock::{Clock, SystemClock};
pub use notifier::{Notification, NotificationPermission, Notifier, NotifyError};
pub use reminder_scheduler::{is_due, ReminderScheduler, SchedulerConfig, SchedulerHandle};
