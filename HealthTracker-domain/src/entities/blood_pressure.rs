use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use health_tracker_data::models::blood_pressure::BloodPressureReading;

/// Form payload for a new blood pressure reading
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateBloodPressureRequest {
    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    /// Systolic blood pressure (the higher number)
    #[validate(required(message = "Systolic is required"))]
    pub systolic: Option<u16>,

    /// Diastolic blood pressure (the lower number)
    #[validate(required(message = "Diastolic is required"))]
    pub diastolic: Option<u16>,
}

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BloodPressureCategory {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    Hypertension1,

    /// Stage 2 Hypertension (systolic ≥ 140 or diastolic ≥ 90)
    Hypertension2,

    /// Hypertensive crisis (systolic ≥ 180 and/or diastolic ≥ 120)
    HypertensiveCrisis,
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Hypertension1 => "Hypertension Stage 1",
            BloodPressureCategory::Hypertension2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        };
        f.write_str(label)
    }
}
