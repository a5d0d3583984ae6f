//! Role checks and per-user record filtering. The store never applies these;
//! screens call them with the signed-in user from their `Session`.

use super::models::{Appointment, HospitalBill, MedicineBill, Patient, Prescription, Report, User};
use super::states::Role;

impl Role {
    pub fn can_view_patients(&self) -> bool {
        matches!(self, Role::Receptionist | Role::Doctor)
    }

    pub fn can_edit_patients(&self) -> bool {
        matches!(self, Role::Receptionist)
    }

    pub fn can_create_prescriptions(&self) -> bool {
        matches!(self, Role::Doctor)
    }

    pub fn can_upload_reports(&self) -> bool {
        matches!(self, Role::Receptionist)
    }

    pub fn can_edit_reports(&self) -> bool {
        matches!(self, Role::Receptionist | Role::Doctor)
    }

    pub fn can_create_bills(&self) -> bool {
        matches!(self, Role::Receptionist | Role::Doctor)
    }
}

/// Records that name the patient they belong to. The name is free text and
/// is never matched against the patients collection.
pub trait PatientOwned {
    fn patient_name(&self) -> &str;
}

macro_rules! impl_patient_owned {
    ($($ty:ty),* $(,)?) => {
        $(impl PatientOwned for $ty {
            fn patient_name(&self) -> &str {
                &self.patient_name
            }
        })*
    };
}

impl_patient_owned!(Prescription, Report, MedicineBill, HospitalBill, Appointment);

/// Patients only see their own records. Staff see everything whose patient
/// name contains `query`, ignoring case; an empty query keeps all.
pub fn visible_to<'a, T: PatientOwned>(records: &'a [T], user: &User, query: &str) -> Vec<&'a T> {
    match user.role {
        Role::Patient => records
            .iter()
            .filter(|r| r.patient_name() == user.name)
            .collect(),
        Role::Receptionist | Role::Doctor => {
            let needle = query.to_lowercase();
            records
                .iter()
                .filter(|r| r.patient_name().to_lowercase().contains(&needle))
                .collect()
        }
    }
}

/// Matches name or condition ignoring case, or a phone substring.
pub fn search_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.condition.to_lowercase().contains(&needle)
                || p.phone.contains(query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::models::{Gender, ReportStatus};

    fn user(role: Role, name: &str) -> User {
        User {
            id: "u".into(),
            name: name.into(),
            email: "x@y.z".into(),
            role,
            avatar: None,
            phone: None,
            address: None,
        }
    }

    fn report(id: &str, patient: &str) -> Report {
        Report {
            id: id.into(),
            patient_name: patient.into(),
            report_type: "Blood Test".into(),
            file_name: "f.pdf".into(),
            upload_date: "2024-01-15".into(),
            uploaded_by: "Priya Sharma".into(),
            file_size: "1.0 MB".into(),
            status: ReportStatus::Pending,
            file_uri: None,
        }
    }

    #[test]
    fn patients_only_see_their_own_records() {
        let reports = vec![report("1", "Amit Patel"), report("2", "Priya Sharma"), report("3", "Amit Patel")];
        let amit = user(Role::Patient, "Amit Patel");
        let ids: Vec<_> = visible_to(&reports, &amit, "priya").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn staff_search_ignores_case() {
        let reports = vec![report("1", "Amit Patel"), report("2", "Priya Sharma")];
        let doctor = user(Role::Doctor, "Dr. Rajesh Kumar");
        assert_eq!(visible_to(&reports, &doctor, "").len(), 2);
        let hits = visible_to(&reports, &doctor, "PRIYA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn permissions_follow_roles() {
        assert!(Role::Receptionist.can_edit_patients());
        assert!(!Role::Doctor.can_edit_patients());
        assert!(Role::Doctor.can_view_patients());
        assert!(!Role::Patient.can_view_patients());
        assert!(Role::Doctor.can_create_prescriptions());
        assert!(!Role::Receptionist.can_create_prescriptions());
        assert!(Role::Receptionist.can_upload_reports());
        assert!(!Role::Doctor.can_upload_reports());
        assert!(Role::Doctor.can_edit_reports());
        assert!(!Role::Patient.can_create_bills());
    }

    #[test]
    fn patient_search_covers_name_condition_and_phone() {
        let base = Patient {
            id: "1".into(),
            name: "Priya Sharma".into(),
            age: 32,
            gender: Gender::Female,
            phone: "+91 87654 32109".into(),
            email: String::new(),
            address: String::new(),
            condition: "Diabetes".into(),
            last_visit: "2024-01-12".into(),
            avatar: String::new(),
            blood_group: None,
            emergency_contact: None,
            allergies: Vec::new(),
            created_at: None,
        };
        let patients = vec![base];
        assert_eq!(search_patients(&patients, "sharma").len(), 1);
        assert_eq!(search_patients(&patients, "DIAB").len(), 1);
        assert_eq!(search_patients(&patients, "32109").len(), 1);
        assert!(search_patients(&patients, "asthma").is_empty());
    }
}
