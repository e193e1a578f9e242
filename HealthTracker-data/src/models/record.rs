use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blob::BlobRef;

/// An uploaded medical record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub date: NaiveDate,
    pub title: String,
    pub file: BlobRef,
}

/// Body system a report relates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportCategory {
    Heart,
    Kidney,
    Eyes,
    Diabetes,
    #[serde(rename = "Foot wound")]
    FootWound,
    Lungs,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
}

impl ReportCategory {
    /// Every category, in form order
    pub const ALL: [ReportCategory; 7] = [
        ReportCategory::Heart,
        ReportCategory::Kidney,
        ReportCategory::Eyes,
        ReportCategory::Diabetes,
        ReportCategory::FootWound,
        ReportCategory::Lungs,
        ReportCategory::BloodPressure,
    ];

    /// Display label of the category
    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Heart => "Heart",
            ReportCategory::Kidney => "Kidney",
            ReportCategory::Eyes => "Eyes",
            ReportCategory::Diabetes => "Diabetes",
            ReportCategory::FootWound => "Foot wound",
            ReportCategory::Lungs => "Lungs",
            ReportCategory::BloodPressure => "Blood Pressure",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportCategory::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| format!("Unknown report category: {}", s))
    }
}

/// An uploaded report, tagged with the body system it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Generated unique identifier
    pub id: String,
    pub category: ReportCategory,
    pub date: NaiveDate,
    pub title: String,
    pub file: BlobRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_category_labels() {
        assert_eq!(
            serde_json::to_string(&ReportCategory::FootWound).unwrap(),
            "\"Foot wound\""
        );
        assert_eq!(
            "Blood Pressure".parse::<ReportCategory>().unwrap(),
            ReportCategory::BloodPressure
        );
        assert!("Liver".parse::<ReportCategory>().is_err());
    }
}
