use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use health_tracker_data::models::sugar::{SugarCategory, SugarReading};

/// Form payload for a new sugar reading
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSugarReadingRequest {
    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "Category is required"))]
    pub category: Option<SugarCategory>,

    /// Sugar level in mg/dL
    #[validate(required(message = "Sugar level is required"))]
    pub level: Option<f64>,
}
