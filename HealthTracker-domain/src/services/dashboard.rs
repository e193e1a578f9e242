//! Dashboard: a periodically refreshed digest of the stored readings

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use health_tracker_data::repository::ReadingStore;

use crate::entities::blood_pressure::{BloodPressureCategory, BloodPressureReading};
use crate::entities::medicine::Medicine;
use crate::entities::sugar::{SugarCategory, SugarReading};
use crate::services::blood_pressure::blood_pressure_chart;
use crate::services::errors::ServiceError;
use crate::services::insights::categorize_reading;
use crate::services::medicines::group_by_frequency;
use crate::services::reducer::{latest_sugar_levels, trailing_window, ChartSeries, LineChart};

/// Number of blood pressure readings charted on the dashboard
pub const BLOOD_PRESSURE_WINDOW: usize = 7;

/// Default interval between dashboard refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Latest sugar level for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SugarSummary {
    pub category: SugarCategory,
    pub level: Option<f64>,
}

impl fmt::Display for SugarSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{}: {} mg/dL", self.category, level),
            None => write!(f, "{}: N/A mg/dL", self.category),
        }
    }
}

/// Latest blood pressure reading with its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BloodPressureSummary {
    pub systolic: u16,
    pub diastolic: u16,
    pub category: BloodPressureCategory,
}

impl fmt::Display for BloodPressureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} mmHg ({})", self.systolic, self.diastolic, self.category)
    }
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// One point per sugar category; categories without readings plot as 0
    pub sugar_chart: LineChart,

    /// Latest level per sugar category
    pub latest_sugar: Vec<SugarSummary>,

    /// Last seven blood pressure readings
    pub blood_pressure_chart: LineChart,

    /// Most recently appended blood pressure reading
    pub latest_blood_pressure: Option<BloodPressureSummary>,

    /// Medicine names grouped by frequency
    pub medicines: BTreeMap<String, Vec<String>>,

    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Build a snapshot from already loaded sequences
    pub fn from_readings(
        sugar: &[SugarReading],
        blood_pressure: &[BloodPressureReading],
        medicines: &[Medicine],
    ) -> Self {
        let latest = latest_sugar_levels(sugar);

        let sugar_series = ChartSeries {
            labels: latest.iter().map(|(category, _)| category.chart_label().to_string()).collect(),
            values: latest.iter().map(|(_, level)| level.unwrap_or(0.0)).collect(),
        };

        let latest_sugar = latest
            .into_iter()
            .map(|(category, level)| SugarSummary { category, level })
            .collect();

        let latest_blood_pressure = blood_pressure.last().map(|reading| BloodPressureSummary {
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            category: categorize_reading(reading),
        });

        Self {
            sugar_chart: LineChart::from_series("Sugar Levels", sugar_series),
            latest_sugar,
            blood_pressure_chart: blood_pressure_chart(trailing_window(blood_pressure, BLOOD_PRESSURE_WINDOW)),
            latest_blood_pressure,
            medicines: group_by_frequency(medicines),
            generated_at: Utc::now(),
        }
    }
}

/// Reads the store and reduces it into a dashboard snapshot
#[derive(Debug, Clone)]
pub struct DashboardService {
    store: ReadingStore,
}

impl DashboardService {
    pub fn new(store: ReadingStore) -> Self {
        Self { store }
    }

    /// Re-read every namespace and build a fresh snapshot
    pub fn snapshot(&self) -> DashboardSnapshot {
        let sugar: Vec<SugarReading> = self.store.load_readings();
        let blood_pressure: Vec<BloodPressureReading> = self.store.load_readings();
        let medicines: Vec<Medicine> = self.store.load_readings();

        debug!(
            "Building dashboard snapshot from {} sugar, {} blood pressure and {} medicine entries",
            sugar.len(),
            blood_pressure.len(),
            medicines.len()
        );

        DashboardSnapshot::from_readings(&sugar, &blood_pressure, &medicines)
    }
}

/// Periodic dashboard refresh with an explicit start/stop lifecycle
#[derive(Debug, Default)]
pub struct DashboardRefresher {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl DashboardRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a snapshot now, then refresh it every `period`
    ///
    /// The returned receiver always holds the most recent snapshot.
    pub fn start(
        &mut self,
        service: DashboardService,
        period: Duration,
    ) -> Result<watch::Receiver<DashboardSnapshot>, ServiceError> {
        if self.handle.is_some() {
            return Err(ServiceError::InvalidState("dashboard refresh already active".to_string()));
        }
        if period.is_zero() {
            return Err(ServiceError::InvalidState("refresh interval must be positive".to_string()));
        }

        let (tx, rx) = watch::channel(service.snapshot());
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        info!("Starting dashboard refresh every {:?}", period);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tx.send_replace(service.snapshot());
                    }
                    _ = token.cancelled() => {
                        info!("Dashboard refresh shutting down");
                        break;
                    }
                }
            }
        });

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(rx)
    }

    /// Whether a refresh loop is running
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the refresh loop and wait for it to finish
    pub async fn stop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Dashboard refresh task failed to join: {}", e);
            }
        }
    }
}

impl Drop for DashboardRefresher {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
