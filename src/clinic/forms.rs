//! Conversions that only exist at the edge between text fields and records.

use chrono::{NaiveDate, Utc};

use super::models::{
    Appointment, AppointmentStatus, AppointmentType, Gender, Medication, Patient, Prescription, PrescriptionStatus,
    Report, ReportStatus, User,
};

pub const DEFAULT_AVATAR: &str =
    "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2";

/// New record ids are the creation time in epoch milliseconds.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// `YYYY-MM-DD`, the format every stored date uses.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Fills the allergies text field of the edit form.
pub fn allergies_to_field(allergies: &[String]) -> String {
    allergies.join(", ")
}

/// Reads the allergies text field back into the canonical list.
pub fn allergies_from_field(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// What the file picker hands back for a report upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub name: String,
    pub size: u64,
    pub uri: String,
}

impl FileSelection {
    pub fn human_size(&self) -> String {
        format!("{:.1} MB", self.size as f64 / (1024.0 * 1024.0))
    }

    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Text fields of the add/edit patient form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub condition: String,
    pub blood_group: String,
    pub emergency_contact: String,
    pub allergies: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl PatientForm {
    /// Pre-fills the edit form from a stored patient.
    pub fn from_patient(patient: &Patient) -> Self {
        PatientForm {
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            address: patient.address.clone(),
            condition: patient.condition.clone(),
            blood_group: patient.blood_group.clone().unwrap_or_default(),
            emergency_contact: patient.emergency_contact.clone().unwrap_or_default(),
            allergies: allergies_to_field(&patient.allergies),
        }
    }

    /// Writes the form over an existing patient, keeping id, avatar and dates.
    pub fn apply_to(&self, patient: &mut Patient) {
        patient.name = self.name.clone();
        patient.age = self.age;
        patient.gender = self.gender;
        patient.phone = self.phone.clone();
        patient.email = self.email.clone();
        patient.address = self.address.clone();
        patient.condition = self.condition.clone();
        patient.blood_group = non_empty(&self.blood_group);
        patient.emergency_contact = non_empty(&self.emergency_contact);
        patient.allergies = allergies_from_field(&self.allergies);
    }
}

impl Patient {
    /// New patient registered and seen `today`.
    pub fn register(form: &PatientForm, today: NaiveDate) -> Self {
        let today = date_string(today);
        let mut patient = Patient {
            id: generate_id(),
            name: String::new(),
            age: 0,
            gender: form.gender,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            condition: String::new(),
            last_visit: today.clone(),
            avatar: DEFAULT_AVATAR.to_string(),
            blood_group: None,
            emergency_contact: None,
            allergies: Vec::new(),
            created_at: Some(today),
        };
        form.apply_to(&mut patient);
        patient
    }
}

impl Report {
    /// Metadata for an uploaded file. Only the name, size and uri are kept.
    pub fn from_upload(
        patient_name: impl Into<String>,
        report_type: impl Into<String>,
        file: &FileSelection,
        uploaded_by: Option<&User>,
        today: NaiveDate,
    ) -> Self {
        Report {
            id: generate_id(),
            patient_name: patient_name.into(),
            report_type: report_type.into(),
            file_name: file.name.clone(),
            upload_date: date_string(today),
            uploaded_by: uploaded_by.map_or_else(|| "Unknown".to_string(), |u| u.name.clone()),
            file_size: file.human_size(),
            status: ReportStatus::Pending,
            file_uri: Some(file.uri.clone()),
        }
    }
}

impl Prescription {
    pub fn new(
        patient_name: impl Into<String>,
        medications: Vec<Medication>,
        notes: impl Into<String>,
        doctor: Option<&User>,
        today: NaiveDate,
    ) -> Self {
        Prescription {
            id: generate_id(),
            patient_name: patient_name.into(),
            doctor_name: doctor.map_or_else(|| "Dr. Unknown".to_string(), |u| u.name.clone()),
            date: date_string(today),
            medications,
            notes: notes.into(),
            status: PrescriptionStatus::Active,
        }
    }
}

impl Appointment {
    /// Books `patient` with `doctor_name`; created on `today`.
    pub fn schedule(
        patient: &Patient,
        doctor_name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        appointment_type: AppointmentType,
        today: NaiveDate,
    ) -> Self {
        Appointment {
            id: generate_id(),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            doctor_name: doctor_name.into(),
            date: date.into(),
            time: time.into(),
            appointment_type,
            status: AppointmentStatus::Scheduled,
            created_at: date_string(today),
        }
    }
}
