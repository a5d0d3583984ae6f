use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::backend::KeyValueStore;
use super::error::StorageError;
use crate::clinic::models::{Appointment, HospitalBill, MedicineBill, Patient, Prescription, Record, Report};

/// Keys of the persisted collections.
pub mod keys {
    pub const PATIENTS: &str = "patients";
    pub const PRESCRIPTIONS: &str = "prescriptions";
    pub const REPORTS: &str = "reports";
    pub const MEDICINE_BILLS: &str = "medicine_bills";
    pub const HOSPITAL_BILLS: &str = "hospital_bills";
    pub const APPOINTMENTS: &str = "appointments";
    pub const USER: &str = "user";
}

/// Typed collections on top of a key-value backend. Every call reads or
/// writes a whole collection; nothing is cached between calls, and the last
/// `save` on a key wins.
pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        RecordStore { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Overwrites the collection under `key`.
    pub async fn save<T: Serialize + Sync>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        if let Err(e) = self.backend.set_item(key, &json).await {
            error!("Error saving {}: {}", key, e);
            return Err(e);
        }
        debug!("saved {} records under {}", records.len(), key);
        Ok(())
    }

    /// Reads the collection under `key`. A missing key is an empty
    /// collection; unreadable JSON is `StorageError::Corrupt`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let raw = match self.backend.get_item(key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error loading {}: {}", key, e);
                return Err(e);
            }
        };
        match raw {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(|source| {
                warn!("Corrupt collection under {}: {}", key, source);
                StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// Appends one record.
    pub async fn insert<T>(&self, key: &str, record: T) -> Result<(), StorageError>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let mut records: Vec<T> = self.load(key).await?;
        records.push(record);
        self.save(key, &records).await
    }

    /// Puts one record first, for lists shown newest-first.
    pub async fn insert_front<T>(&self, key: &str, record: T) -> Result<(), StorageError>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let mut records: Vec<T> = self.load(key).await?;
        records.insert(0, record);
        self.save(key, &records).await
    }

    /// Replaces the record sharing `record`'s id. Returns false, without
    /// writing, if there is none.
    pub async fn update<T>(&self, key: &str, record: T) -> Result<bool, StorageError>
    where
        T: Serialize + DeserializeOwned + Record + Sync,
    {
        let mut records: Vec<T> = self.load(key).await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
            return Ok(false);
        };
        *slot = record;
        self.save(key, &records).await?;
        Ok(true)
    }

    /// Drops the record with `id`. Returns false, without writing, if there
    /// is none.
    pub async fn delete<T>(&self, key: &str, id: &str) -> Result<bool, StorageError>
    where
        T: Serialize + DeserializeOwned + Record + Sync,
    {
        let records: Vec<T> = self.load(key).await?;
        let before = records.len();
        let kept: Vec<T> = records.into_iter().filter(|r| r.id() != id).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.save(key, &kept).await?;
        Ok(true)
    }

    /// Writes `make()` under `key` only when the stored collection is empty.
    /// Returns whether it wrote.
    pub async fn seed_if_empty<T, F>(&self, key: &str, make: F) -> Result<bool, StorageError>
    where
        T: Serialize + DeserializeOwned + Sync,
        F: FnOnce() -> Vec<T>,
    {
        let existing: Vec<T> = self.load(key).await?;
        if !existing.is_empty() {
            return Ok(false);
        }
        self.save(key, &make()).await?;
        Ok(true)
    }

    /// Single JSON value under `key`, used for the session user.
    pub async fn get_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_item(key).await? {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub async fn set_value<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &json).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove_item(key).await
    }

    pub async fn save_patients(&self, patients: &[Patient]) -> Result<(), StorageError> {
        self.save(keys::PATIENTS, patients).await
    }

    pub async fn load_patients(&self) -> Result<Vec<Patient>, StorageError> {
        self.load(keys::PATIENTS).await
    }

    pub async fn save_prescriptions(&self, prescriptions: &[Prescription]) -> Result<(), StorageError> {
        self.save(keys::PRESCRIPTIONS, prescriptions).await
    }

    pub async fn load_prescriptions(&self) -> Result<Vec<Prescription>, StorageError> {
        self.load(keys::PRESCRIPTIONS).await
    }

    pub async fn save_reports(&self, reports: &[Report]) -> Result<(), StorageError> {
        self.save(keys::REPORTS, reports).await
    }

    pub async fn load_reports(&self) -> Result<Vec<Report>, StorageError> {
        self.load(keys::REPORTS).await
    }

    pub async fn save_medicine_bills(&self, bills: &[MedicineBill]) -> Result<(), StorageError> {
        self.save(keys::MEDICINE_BILLS, bills).await
    }

    pub async fn load_medicine_bills(&self) -> Result<Vec<MedicineBill>, StorageError> {
        self.load(keys::MEDICINE_BILLS).await
    }

    pub async fn save_hospital_bills(&self, bills: &[HospitalBill]) -> Result<(), StorageError> {
        self.save(keys::HOSPITAL_BILLS, bills).await
    }

    pub async fn load_hospital_bills(&self) -> Result<Vec<HospitalBill>, StorageError> {
        self.load(keys::HOSPITAL_BILLS).await
    }

    pub async fn save_appointments(&self, appointments: &[Appointment]) -> Result<(), StorageError> {
        self.save(keys::APPOINTMENTS, appointments).await
    }

    pub async fn load_appointments(&self) -> Result<Vec<Appointment>, StorageError> {
        self.load(keys::APPOINTMENTS).await
    }
}
