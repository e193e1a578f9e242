use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use health_tracker_data::models::record::{MedicalRecord, Report, ReportCategory};

/// A file handed over by the file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Form payload for a new medical record
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateMedicalRecordRequest {
    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
}

/// Form payload for a new report
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(required(message = "Category is required"))]
    pub category: Option<ReportCategory>,

    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
}
