use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use health_tracker_data::models::medicine::Medicine;

/// Form payload for a new medicine
///
/// The optional prescription scan travels separately as an uploaded file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicineRequest {
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(required(message = "Dosage is required"), length(min = 1, message = "Dosage is required"))]
    pub dosage: Option<String>,

    #[validate(required(message = "Frequency is required"), length(min = 1, message = "Frequency is required"))]
    pub frequency: Option<String>,

    #[validate(
        required(message = "Prescription is required"),
        length(min = 1, message = "Prescription is required")
    )]
    pub prescription: Option<String>,

    #[validate(required(message = "Last prescription date is required"))]
    pub last_prescription_date: Option<NaiveDate>,
}
