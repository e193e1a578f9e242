use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{ser, Deserialize, Serialize, Serializer};

use crate::repository::{Namespace, Reading};

/// Meal-relative slot a sugar reading belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SugarCategory {
    #[serde(rename = "Fasting")]
    Fasting,

    #[serde(rename = "After breakfast")]
    AfterBreakfast,

    #[serde(rename = "After lunch")]
    AfterLunch,

    #[serde(rename = "After dinner")]
    AfterDinner,
}

impl SugarCategory {
    /// Every category, in the order they are charted
    pub const ALL: [SugarCategory; 4] = [
        SugarCategory::Fasting,
        SugarCategory::AfterBreakfast,
        SugarCategory::AfterLunch,
        SugarCategory::AfterDinner,
    ];

    /// Stored label of the category
    pub fn label(&self) -> &'static str {
        match self {
            SugarCategory::Fasting => "Fasting",
            SugarCategory::AfterBreakfast => "After breakfast",
            SugarCategory::AfterLunch => "After lunch",
            SugarCategory::AfterDinner => "After dinner",
        }
    }

    /// Title-case label used on the dashboard chart axis
    pub fn chart_label(&self) -> &'static str {
        match self {
            SugarCategory::Fasting => "Fasting",
            SugarCategory::AfterBreakfast => "After Breakfast",
            SugarCategory::AfterLunch => "After Lunch",
            SugarCategory::AfterDinner => "After Dinner",
        }
    }
}

impl fmt::Display for SugarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SugarCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SugarCategory::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| format!("Unknown sugar category: {}", s))
    }
}

/// Storage model for a blood sugar reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SugarReading {
    /// Day the reading was taken
    pub date: NaiveDate,

    /// Meal-relative slot
    pub category: SugarCategory,

    /// Blood sugar level in mg/dL
    #[serde(serialize_with = "serialize_finite")]
    pub level: f64,
}

/// JSON has no representation for NaN or infinity; refuse them instead of writing `null`
fn serialize_finite<S>(level: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !level.is_finite() {
        return Err(ser::Error::custom(format!("sugar level must be finite, got {}", level)));
    }
    serializer.serialize_f64(*level)
}

impl Reading for SugarReading {
    const NAMESPACE: Namespace = Namespace::SUGAR_LEVELS;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_json() {
        let reading = SugarReading {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category: SugarCategory::AfterBreakfast,
            level: 132.5,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-01","category":"After breakfast","level":132.5}"#
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("After dinner".parse::<SugarCategory>().unwrap(), SugarCategory::AfterDinner);
        assert!("Brunch".parse::<SugarCategory>().is_err());
    }

    #[test]
    fn test_non_finite_level_fails_to_serialize() {
        let reading = SugarReading {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category: SugarCategory::Fasting,
            level: f64::NAN,
        };

        assert!(serde_json::to_string(&reading).is_err());
    }

    #[test]
    fn test_integer_level_is_accepted() {
        let reading: SugarReading =
            serde_json::from_str(r#"{"date":"2024-03-01","category":"Fasting","level":90}"#).unwrap();
        assert_eq!(reading.level, 90.0);
    }
}
