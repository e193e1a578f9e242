// Domain services
// Each page service owns the non-presentation logic of one tracker page.

pub mod blood_pressure;
pub mod dashboard;
pub mod errors;
pub mod insights;
pub mod medicines;
pub mod records;
pub mod reducer;
pub mod sugar;

// Re-export services and their shared error type
pub use blood_pressure::BloodPressureService;
pub use dashboard::{DashboardRefresher, DashboardService, DashboardSnapshot};
pub use errors::ServiceError;
pub use medicines::MedicineService;
pub use records::{MedicalRecordService, ReportService, ReportStatistics};
pub use reducer::{ChartSeries, LineChart};
pub use sugar::SugarService;
