// Health Tracker Domain
// This crate contains the logic behind the tracker's pages: validation, derived views and reminders

// Form requests and their conversions into stored models
pub mod entities;

// Page services, the category reducer and the dashboard
pub mod services;

// Reminder polling and notification requests
pub mod scheduler;

// Re-export the data layer for convenience
pub use health_tracker_data as data;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
