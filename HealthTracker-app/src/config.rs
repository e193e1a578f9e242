use std::env;
use std::time::Duration;

use tracing::info;

use health_tracker_data::database::{DatabaseError, StorageConfig};
use health_tracker_domain::scheduler::SchedulerConfig;
use health_tracker_domain::services::dashboard::DEFAULT_REFRESH_INTERVAL;

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the readings are persisted
    pub storage: StorageConfig,

    /// Interval between dashboard refreshes
    pub dashboard_refresh: Duration,

    /// Reminder polling settings
    pub scheduler: SchedulerConfig,

    /// Whether the host grants notification permission
    pub notifications_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            dashboard_refresh: DEFAULT_REFRESH_INTERVAL,
            scheduler: SchedulerConfig::default(),
            notifications_enabled: true,
        }
    }
}

impl AppConfig {
    /// Configuration backed by in-memory storage
    pub fn in_memory() -> Self {
        Self {
            storage: StorageConfig::in_memory(),
            ..Self::default()
        }
    }

    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let storage = StorageConfig::from_env()?;

        let dashboard_refresh = env::var("DASHBOARD_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL);

        let notifications_enabled = env::var("NOTIFICATIONS_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let scheduler = SchedulerConfig::from_env();

        info!(
            "Dashboard refresh every {:?}, reminder check every {:?}, notifications {}",
            dashboard_refresh,
            scheduler.interval,
            if notifications_enabled { "enabled" } else { "disabled" }
        );

        Ok(Self {
            storage,
            dashboard_refresh,
            scheduler,
            notifications_enabled,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.dashboard_refresh, Duration::from_secs(60));
        assert_eq!(config.scheduler.interval, Duration::from_secs(60));
        assert!(config.notifications_enabled);
    }
}
