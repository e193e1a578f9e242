use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use health_tracker_data::models::reminder::{parse_time_of_day, Reminder, ReminderKind};

/// Form payload for a new reminder
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateReminderRequest {
    #[serde(rename = "type")]
    #[validate(required(message = "Type is required"))]
    pub kind: Option<ReminderKind>,

    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    /// Time of day as `hh:mm`
    #[validate(required(message = "Time is required"))]
    pub time: Option<String>,

    /// Required for appointments, ignored for medicine reminders
    pub date: Option<NaiveDate>,
}
