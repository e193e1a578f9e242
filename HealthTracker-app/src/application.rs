use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use health_tracker_data::database::DatabaseError;
use health_tracker_data::repository::ReadingStore;
use health_tracker_data::storage::{open_storage, BlobStore, InMemoryBlobStore, KeyValueStorage};
use health_tracker_domain::scheduler::{Clock, Notifier, ReminderScheduler, SchedulerHandle};
use health_tracker_domain::services::{
    BloodPressureService, DashboardRefresher, DashboardService, DashboardSnapshot, MedicalRecordService,
    MedicineService, ReportService, ServiceError, SugarService,
};

use crate::config::AppConfig;

/// The tracker's services wired to one store, plus the background timers
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    store: ReadingStore,
    pub sugar: SugarService,
    pub blood_pressure: BloodPressureService,
    pub medicines: MedicineService,
    pub records: MedicalRecordService,
    pub reports: ReportService,
    pub dashboard: DashboardService,
    pub reminders: ReminderScheduler,
    refresher: DashboardRefresher,
    scheduler: Option<SchedulerHandle>,
}

/// Open the configured storage and build the application on top of it
pub fn create_application(config: AppConfig) -> Result<Application, DatabaseError> {
    let storage = open_storage(&config.storage)?;
    Ok(Application::with_storage(config, storage))
}

impl Application {
    /// Build the application on an already opened storage backend
    pub fn with_storage(config: AppConfig, storage: Arc<dyn KeyValueStorage>) -> Self {
        let store = ReadingStore::new(storage);
        let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());

        Self {
            sugar: SugarService::new(store.clone()),
            blood_pressure: BloodPressureService::new(store.clone()),
            medicines: MedicineService::new(store.clone(), blobs.clone()),
            records: MedicalRecordService::new(blobs.clone()),
            reports: ReportService::new(blobs),
            dashboard: DashboardService::new(store.clone()),
            reminders: ReminderScheduler::new(config.scheduler.clone()),
            refresher: DashboardRefresher::new(),
            scheduler: None,
            store,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    /// Start the dashboard refresh and the reminder loop
    pub fn start(
        &mut self,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<watch::Receiver<DashboardSnapshot>, ServiceError> {
        if self.scheduler.is_some() {
            return Err(ServiceError::InvalidState("application already started".to_string()));
        }

        let snapshots = self
            .refresher
            .start(self.dashboard.clone(), self.config.dashboard_refresh)?;
        self.scheduler = Some(self.reminders.start(notifier, clock));

        info!("Application started");
        Ok(snapshots)
    }

    pub fn is_running(&self) -> bool {
        self.refresher.is_running()
    }

    /// Stop both timers and wait for them to finish
    pub async fn shutdown(&mut self) {
        self.refresher.stop().await;

        if let Some(mut handle) = self.scheduler.take() {
            handle.stop().await;
        }

        info!("Application stopped");
    }
}
