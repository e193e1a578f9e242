use crate::entities::blood_pressure::{BloodPressureCategory, BloodPressureReading};

/// Categorize blood pressure based on measurements
pub fn categorize_blood_pressure(systolic: u16, diastolic: u16) -> BloodPressureCategory {
    if systolic >= 180 || diastolic >= 120 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::Hypertension2
    } else if systolic >= 130 || diastolic >= 80 {
        BloodPressureCategory::Hypertension1
    } else if systolic >= 120 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

/// Categorize a stored reading
pub fn categorize_reading(reading: &BloodPressureReading) -> BloodPressureCategory {
    categorize_blood_pressure(reading.systolic, reading.diastolic)
}
