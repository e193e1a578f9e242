use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repository::{Namespace, Reading};

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    /// Day the reading was taken
    pub date: NaiveDate,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,
}

impl Reading for BloodPressureReading {
    const NAMESPACE: Namespace = Namespace::BLOOD_PRESSURE;
}
