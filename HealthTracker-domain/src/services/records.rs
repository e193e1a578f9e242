//! Medical records and reports pages
//!
//! Both pages keep their lists in memory only; uploaded files live in the
//! shared blob store and are handed back unchanged on download.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use health_tracker_data::models::BlobRef;
use health_tracker_data::storage::BlobStore;

use crate::entities::conversions;
use crate::entities::records::{
    CreateMedicalRecordRequest, CreateReportRequest, MedicalRecord, Report, UploadedFile,
};
use crate::services::errors::{validate_request, ServiceError};

fn store_file(blobs: &dyn BlobStore, file: UploadedFile) -> Result<BlobRef, ServiceError> {
    if file.filename.trim().is_empty() {
        return Err(ServiceError::ValidationError("file: File is required".to_string()));
    }
    Ok(blobs.put(&file.filename, file.bytes)?)
}

fn fetch_file(blobs: &dyn BlobStore, blob: &BlobRef) -> Result<(String, Vec<u8>), ServiceError> {
    debug!("Fetching file {} ({})", blob.filename, blob.id);

    let bytes = blobs
        .get(blob)?
        .ok_or_else(|| ServiceError::NotFound(format!("File {} not found", blob.filename)))?;
    Ok((blob.filename.clone(), bytes))
}

/// Logic behind the medical records page
#[derive(Debug, Clone)]
pub struct MedicalRecordService {
    records: Arc<Mutex<Vec<MedicalRecord>>>,
    blobs: Arc<dyn BlobStore>,
}

impl MedicalRecordService {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            blobs,
        }
    }

    /// Store the file and append the record
    pub fn add_record(
        &self,
        request: CreateMedicalRecordRequest,
        file: UploadedFile,
    ) -> Result<Vec<MedicalRecord>, ServiceError> {
        validate_request(&request)?;

        let blob = store_file(self.blobs.as_ref(), file)?;
        let record = conversions::convert_to_medical_record(request, blob).map_err(ServiceError::ValidationError)?;
        info!("Adding medical record: {} on {}", record.title, record.date);

        let mut records = self.records.lock()?;
        records.push(record);
        Ok(records.clone())
    }

    /// All records in upload order
    pub fn records(&self) -> Result<Vec<MedicalRecord>, ServiceError> {
        Ok(self.records.lock()?.clone())
    }

    /// Filename and contents of a record's file
    pub fn download(&self, record: &MedicalRecord) -> Result<(String, Vec<u8>), ServiceError> {
        fetch_file(self.blobs.as_ref(), &record.file)
    }
}

/// Summary shown above the reports table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportStatistics {
    /// Number of uploaded reports
    pub total: usize,

    /// Date of the most recently uploaded report, in upload order
    pub latest_upload: Option<NaiveDate>,
}

/// Logic behind the reports page
#[derive(Debug, Clone)]
pub struct ReportService {
    reports: Arc<Mutex<Vec<Report>>>,
    blobs: Arc<dyn BlobStore>,
}

impl ReportService {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            blobs,
        }
    }

    /// Store the file and append a report under a fresh id
    pub fn add_report(&self, request: CreateReportRequest, file: UploadedFile) -> Result<Report, ServiceError> {
        validate_request(&request)?;

        let blob = store_file(self.blobs.as_ref(), file)?;
        let report = conversions::convert_to_report(request, Uuid::new_v4().to_string(), blob)
            .map_err(ServiceError::ValidationError)?;
        info!("Adding {} report: {} ({})", report.category, report.title, report.id);

        self.reports.lock()?.push(report.clone());
        Ok(report)
    }

    /// All reports in upload order
    pub fn reports(&self) -> Result<Vec<Report>, ServiceError> {
        Ok(self.reports.lock()?.clone())
    }

    /// Total count and latest upload date
    pub fn statistics(&self) -> Result<ReportStatistics, ServiceError> {
        let reports = self.reports.lock()?;
        Ok(ReportStatistics {
            total: reports.len(),
            latest_upload: reports.last().map(|report| report.date),
        })
    }

    /// Filename and contents of the report with the given id
    pub fn download(&self, id: &str) -> Result<(String, Vec<u8>), ServiceError> {
        let blob = {
            let reports = self.reports.lock()?;
            reports
                .iter()
                .find(|report| report.id == id)
                .map(|report| report.file.clone())
                .ok_or_else(|| ServiceError::NotFound(format!("Report with ID {} not found", id)))?
        };

        fetch_file(self.blobs.as_ref(), &blob)
    }
}
