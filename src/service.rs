//! The record-management operations, decoupled from the HTTP surface.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::ServiceError;
use crate::patient::{Patient, PatientView};
use crate::query;
use crate::storage::PatientStore;

pub const BANNER: &str = "Patient Management System API";

/// Stateless request handlers over an injected store.
///
/// Every operation is a single load / compute / (save) transaction; no
/// state is held between calls.
pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        PatientService { store }
    }

    /// Static service banner.
    pub fn info(&self) -> &'static str {
        BANNER
    }

    /// The entire collection, id to full view, derived fields included.
    pub fn view_all(&self) -> Result<IndexMap<String, PatientView>, ServiceError> {
        let collection = self.store.load()?;
        Ok(collection
            .iter()
            .map(|(id, record)| (id.clone(), record.view()))
            .collect())
    }

    /// A single record's full view.
    pub fn get_patient(&self, id: &str) -> Result<PatientView, ServiceError> {
        let collection = self.store.load()?;
        collection
            .get(id)
            .map(|record| record.view())
            .ok_or_else(|| ServiceError::NotFound("Patient not found".to_string()))
    }

    /// All records' full views, ordered by the requested field.
    pub fn list_sorted(&self, sort_by: &str, order: &str) -> Result<Vec<PatientView>, ServiceError> {
        let collection = self.store.load()?;
        query::sorted_view(&collection, sort_by, order)
    }

    /// Validates and inserts a new record, rewriting the whole collection.
    ///
    /// Either fully succeeds (validated, inserted, persisted) or fails with
    /// no mutation committed. There is no lock on the backing store:
    /// concurrent creates race last-writer-wins on save, and callers that
    /// need stronger guarantees must serialize writes externally.
    pub fn create(&self, patient: Patient) -> Result<(), ServiceError> {
        patient.validate()?;

        let mut collection = self.store.load()?;
        if collection.contains_key(&patient.id) {
            return Err(ServiceError::Conflict(
                "Patient with this ID already exists".to_string(),
            ));
        }

        let (id, record) = patient.into_parts();
        collection.insert(id.clone(), record);
        self.store.save(&collection)?;

        info!(patient_id = %id, "patient created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, Verdict};
    use crate::storage::FileStore;
    use std::fs;
    use tempfile::TempDir;

    fn test_service() -> (PatientService, std::path::PathBuf, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStore::new(&path).unwrap();
        (PatientService::new(Arc::new(store)), path, dir)
    }

    fn patient(id: &str, height: f64, weight: f64) -> Patient {
        Patient {
            id: id.to_string(),
            name: "John Doe".to_string(),
            age: 30,
            gender: Gender::Male,
            height,
            weight,
        }
    }

    #[test]
    fn create_then_get_round_trip() {
        let (service, _, _dir) = test_service();
        service.create(patient("P001", 1.755, 70.2)).unwrap();

        let view = service.get_patient("P001").unwrap();
        assert_eq!(view.name, "John Doe");
        assert_eq!(view.age, 30);
        assert_eq!(view.height, 1.755);
        assert_eq!(view.weight, 70.2);
        assert_eq!(view.bmi, 22.79);
        assert_eq!(view.verdict, Verdict::NormalWeight);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let (service, _, _dir) = test_service();
        match service.get_patient("P404").unwrap_err() {
            ServiceError::NotFound(msg) => assert_eq!(msg, "Patient not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_create_conflicts_and_commits_nothing() {
        let (service, path, _dir) = test_service();
        service.create(patient("P001", 1.755, 70.2)).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = service.create(patient("P001", 1.60, 50.0)).unwrap_err();
        match err {
            ServiceError::Conflict(msg) => {
                assert_eq!(msg, "Patient with this ID already exists")
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn invalid_record_commits_nothing() {
        let (service, path, _dir) = test_service();
        let before = fs::read_to_string(&path).unwrap();

        let err = service.create(patient("P001", 0.0, 70.2)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn reads_never_mutate_the_collection() {
        let (service, path, _dir) = test_service();
        service.create(patient("P001", 1.80, 70.0)).unwrap();
        service.create(patient("P002", 1.70, 70.0)).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        service.view_all().unwrap();
        service.get_patient("P001").unwrap();
        service.list_sorted("bmi", "desc").unwrap();
        let _ = service.list_sorted("age", "asc");

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn view_all_includes_derived_fields_for_each_record() {
        let (service, _, _dir) = test_service();
        service.create(patient("P001", 1.80, 70.0)).unwrap();
        service.create(patient("P002", 1.60, 70.0)).unwrap();

        let all = service.view_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["P001"].bmi, 21.6);
        assert_eq!(all["P002"].bmi, 27.34);
        let ids: Vec<&String> = all.keys().collect();
        assert_eq!(ids, ["P001", "P002"]);
    }

    #[test]
    fn list_sorted_delegates_parameter_validation() {
        let (service, _, _dir) = test_service();
        assert!(matches!(
            service.list_sorted("age", "asc").unwrap_err(),
            ServiceError::InvalidQuery(_)
        ));
        assert!(matches!(
            service.list_sorted("bmi", "up").unwrap_err(),
            ServiceError::InvalidQuery(_)
        ));
    }
}
