// Storage models for every entity the tracker keeps
pub mod blob;
pub mod blood_pressure;
pub mod medicine;
pub mod record;
pub mod reminder;
pub mod sugar;

// Re-export common types for easier imports
pub use blob::BlobRef;
pub use blood_pressure::BloodPressureReading;
pub use medicine::Medicine;
pub use record::{MedicalRecord, Report, ReportCategory};
pub use reminder::{Reminder, ReminderKind};
pub use sugar::{SugarCategory, SugarReading};
