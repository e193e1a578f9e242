use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use health_tracker_data::repository::ReadingStore;
use health_tracker_data::storage::BlobStore;

use crate::entities::conversions;
use crate::entities::medicine::{CreateMedicineRequest, Medicine};
use crate::entities::records::UploadedFile;
use crate::services::errors::{validate_request, ServiceError};

/// Group medicine names by how often they are taken
///
/// This is the category -> names view the dashboard lists. Names keep their
/// append order inside each group.
pub fn group_by_frequency(medicines: &[Medicine]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for medicine in medicines {
        groups
            .entry(medicine.frequency.clone())
            .or_default()
            .push(medicine.name.clone());
    }
    groups
}

/// Logic behind the medicines page
#[derive(Debug, Clone)]
pub struct MedicineService {
    store: ReadingStore,
    blobs: Arc<dyn BlobStore>,
}

impl MedicineService {
    pub fn new(store: ReadingStore, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Record a medicine, storing the prescription scan first if one was attached
    pub fn add_medicine(
        &self,
        request: CreateMedicineRequest,
        prescription_file: Option<UploadedFile>,
    ) -> Result<Vec<Medicine>, ServiceError> {
        validate_request(&request)?;

        let file = match prescription_file {
            Some(file) => Some(self.blobs.put(&file.filename, file.bytes)?),
            None => None,
        };

        let result = conversions::convert_to_medicine(request, file.clone())
            .map_err(ServiceError::ValidationError)
            .and_then(|medicine| {
                info!("Adding medicine: {} ({}, {})", medicine.name, medicine.dosage, medicine.frequency);
                Ok(self.store.append_reading(medicine)?)
            });

        // A medicine that was never stored must not leave its scan behind
        if let (Err(_), Some(blob)) = (&result, &file) {
            if let Err(e) = self.blobs.remove(blob) {
                warn!("Failed to remove prescription file {}: {}", blob.filename, e);
            }
        }

        result
    }

    /// All medicines in append order
    pub fn medicines(&self) -> Vec<Medicine> {
        self.store.load_readings()
    }

    /// Fetch the prescription scan of a medicine, if it has one
    pub fn prescription_file(&self, medicine: &Medicine) -> Result<Option<(String, Vec<u8>)>, ServiceError> {
        let Some(blob) = &medicine.last_prescription_file else {
            return Ok(None);
        };

        let bytes = self
            .blobs
            .get(blob)?
            .ok_or_else(|| ServiceError::NotFound(format!("Prescription file {} not found", blob.filename)))?;

        Ok(Some((blob.filename.clone(), bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use health_tracker_data::storage::{InMemoryBlobStore, KeyValueStorage, StorageError};

    fn service() -> MedicineService {
        MedicineService::new(ReadingStore::in_memory(), Arc::new(InMemoryBlobStore::new()))
    }

    fn request(name: &str, frequency: &str) -> CreateMedicineRequest {
        CreateMedicineRequest {
            name: Some(name.to_string()),
            dosage: Some("500mg".to_string()),
            frequency: Some(frequency.to_string()),
            prescription: Some("Dr. Rao".to_string()),
            last_prescription_date: NaiveDate::from_ymd_opt(2024, 3, 3),
        }
    }

    #[test]
    fn test_add_medicine_persists() {
        let service = service();
        service.add_medicine(request("Metformin", "Twice daily"), None).unwrap();

        let medicines = service.medicines();
        assert_eq!(medicines.len(), 1);
        assert_eq!(medicines[0].name, "Metformin");
        assert_eq!(medicines[0].last_prescription_file, None);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let service = service();
        let result = service.add_medicine(request("", "Daily"), None);

        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
        assert!(service.medicines().is_empty());
    }

    #[test]
    fn test_prescription_file_round_trip() {
        let service = service();
        let file = UploadedFile::new("rx.jpg", vec![0xFF, 0xD8]);
        let medicines = service.add_medicine(request("Insulin", "Nightly"), Some(file)).unwrap();

        let (filename, bytes) = service.prescription_file(&medicines[0]).unwrap().unwrap();
        assert_eq!(filename, "rx.jpg");
        assert_eq!(bytes, vec![0xFF, 0xD8]);
    }

    /// Backend whose writes always fail
    #[derive(Debug, Default)]
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Lock("storage is read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_discards_prescription_file() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let service = MedicineService::new(ReadingStore::new(Arc::new(ReadOnlyStorage)), blobs.clone());

        let file = UploadedFile::new("rx.jpg", vec![0xFF, 0xD8]);
        let result = service.add_medicine(request("Insulin", "Nightly"), Some(file));

        assert!(matches!(result, Err(ServiceError::RepositoryError(_))));
        assert!(blobs.is_empty());
    }

    #[test]
    fn test_group_by_frequency() {
        let service = service();
        service.add_medicine(request("Metformin", "Twice daily"), None).unwrap();
        service.add_medicine(request("Atorvastatin", "Nightly"), None).unwrap();
        service.add_medicine(request("Glipizide", "Twice daily"), None).unwrap();

        let groups = group_by_frequency(&service.medicines());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Twice daily"], vec!["Metformin", "Glipizide"]);
        assert_eq!(groups["Nightly"], vec!["Atorvastatin"]);
    }
}
