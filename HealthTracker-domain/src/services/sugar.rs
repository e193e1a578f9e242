use tracing::info;

use health_tracker_data::repository::ReadingStore;

use crate::entities::conversions;
use crate::entities::sugar::{CreateSugarReadingRequest, SugarReading};
use crate::services::errors::{validate_request, ServiceError};
use crate::services::reducer::{to_chart_series, LineChart};

/// Logic behind the sugar levels page
#[derive(Debug, Clone)]
pub struct SugarService {
    store: ReadingStore,
}

impl SugarService {
    /// Create a new sugar service over the shared store
    pub fn new(store: ReadingStore) -> Self {
        Self { store }
    }

    /// Validate a sugar form before it reaches the store
    pub fn validate_create_request(&self, request: &CreateSugarReadingRequest) -> Result<(), ServiceError> {
        validate_request(request)?;

        // Additional validation: the level must be a real number
        if let Some(level) = request.level {
            if !level.is_finite() {
                return Err(ServiceError::ValidationError(
                    "level: Sugar level must be a finite number".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Append a reading and return the full stored sequence
    pub fn add_reading(&self, request: CreateSugarReadingRequest) -> Result<Vec<SugarReading>, ServiceError> {
        self.validate_create_request(&request)?;

        let reading = conversions::convert_to_sugar_reading(request).map_err(ServiceError::ValidationError)?;
        info!("Adding sugar reading: {} {} mg/dL on {}", reading.category, reading.level, reading.date);

        Ok(self.store.append_reading(reading)?)
    }

    /// All readings in append order
    pub fn readings(&self) -> Vec<SugarReading> {
        self.store.load_readings()
    }

    /// Trend of every reading, labelled with its date and category
    pub fn trend_chart(&self) -> LineChart {
        let readings = self.readings();
        let series = to_chart_series(
            &readings,
            |r| format!("{} ({})", r.date.format("%Y-%m-%d"), r.category),
            |r| r.level,
        );
        LineChart::from_series("Sugar Levels", series)
    }
}
