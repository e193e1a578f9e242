use tracing::info;

use health_tracker_data::repository::ReadingStore;

use crate::entities::blood_pressure::{BloodPressureCategory, BloodPressureReading, CreateBloodPressureRequest};
use crate::entities::conversions;
use crate::services::errors::{validate_request, ServiceError};
use crate::services::insights::categorize_reading;
use crate::services::reducer::{to_chart_series, LineChart};

/// Build the systolic/diastolic chart for a run of readings, labelled by date
pub fn blood_pressure_chart(readings: &[BloodPressureReading]) -> LineChart {
    let systolic = to_chart_series(readings, |r| r.date.to_string(), |r| f64::from(r.systolic));
    let diastolic = to_chart_series(readings, |r| r.date.to_string(), |r| f64::from(r.diastolic));

    LineChart::from_series("Systolic", systolic).with_dataset("Diastolic", diastolic.values)
}

/// Logic behind the blood pressure page
#[derive(Debug, Clone)]
pub struct BloodPressureService {
    store: ReadingStore,
}

impl BloodPressureService {
    /// Create a new blood pressure service over the shared store
    pub fn new(store: ReadingStore) -> Self {
        Self { store }
    }

    /// Append a reading and return the full stored sequence
    pub fn add_reading(
        &self,
        request: CreateBloodPressureRequest,
    ) -> Result<Vec<BloodPressureReading>, ServiceError> {
        validate_request(&request)?;

        let reading =
            conversions::convert_to_blood_pressure_reading(request).map_err(ServiceError::ValidationError)?;
        info!(
            "Adding blood pressure reading: {}/{} mmHg on {}",
            reading.systolic, reading.diastolic, reading.date
        );

        Ok(self.store.append_reading(reading)?)
    }

    /// All readings in append order
    pub fn readings(&self) -> Vec<BloodPressureReading> {
        self.store.load_readings()
    }

    /// Most recently appended reading with its category
    pub fn latest(&self) -> Option<(BloodPressureReading, BloodPressureCategory)> {
        self.readings().pop().map(|reading| {
            let category = categorize_reading(&reading);
            (reading, category)
        })
    }

    /// Trend of every reading
    pub fn trend_chart(&self) -> LineChart {
        blood_pressure_chart(&self.readings())
    }
}
