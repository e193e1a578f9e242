// Domain entities: form requests and the stored models they become
pub mod blood_pressure;
pub mod conversions;
pub mod medicine;
pub mod records;
pub mod reminder;
pub mod sugar;

// Re-export common types for easier imports
pub use blood_pressure::{BloodPressureCategory, BloodPressureReading, CreateBloodPressureRequest};
pub use medicine::{CreateMedicineRequest, Medicine};
pub use records::{
    CreateMedicalRecordRequest, CreateReportRequest, MedicalRecord, Report, ReportCategory,
    UploadedFile,
};
pub use reminder::{CreateReminderRequest, Reminder, ReminderKind};
pub use sugar::{CreateSugarReadingRequest, SugarCategory, SugarReading};
