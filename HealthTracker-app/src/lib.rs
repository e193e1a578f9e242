// HealthTracker host
//
// Wires the configured storage into the page services and runs the two
// background timers: dashboard refresh and reminder polling.

pub mod application;
pub mod config;
pub mod notifier;

pub use application::{create_application, Application};
pub use config::AppConfig;
pub use notifier::LogNotifier;
