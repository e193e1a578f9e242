use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// What a reminder is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    /// Recurs every day at the given time
    Medicine,
    /// Fires once, on the given date and time
    Appointment,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::Medicine => write!(f, "medicine"),
            ReminderKind::Appointment => write!(f, "appointment"),
        }
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medicine" => Ok(ReminderKind::Medicine),
            "appointment" => Ok(ReminderKind::Appointment),
            _ => Err(format!("Unknown reminder type: {}", s)),
        }
    }
}

/// A time-of-day reminder, optionally pinned to a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier derived from the creation time
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ReminderKind,

    pub title: String,

    /// Time of day, stored as `hh:mm`
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,

    /// Only meaningful for appointments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Parse an `hh:mm` (or `hh:mm:ss`) time of day
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Serde helpers for `hh:mm` times
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_json_shape() {
        let reminder = Reminder {
            id: "1700000000000".to_string(),
            kind: ReminderKind::Appointment,
            title: "Eye check".to_string(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2),
        };

        let json = serde_json::to_string(&reminder).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1700000000000","type":"appointment","title":"Eye check","time":"09:30","date":"2024-05-02"}"#
        );

        let parsed: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reminder);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time_of_day("07:05:30"), NaiveTime::from_hms_opt(7, 5, 30));
        assert_eq!(parse_time_of_day("7pm"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
    }
}
