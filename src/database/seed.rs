use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::backend::KeyValueStore;
use super::error::StorageError;
use super::records::{keys, RecordStore};
use crate::clinic::forms::{date_string, DEFAULT_AVATAR};
use crate::clinic::models::*;

const AVATAR_RAJESH: &str = DEFAULT_AVATAR;
const AVATAR_PRIYA: &str =
    "https://images.pexels.com/photos/3823488/pexels-photo-3823488.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2";
const AVATAR_AMIT: &str =
    "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2";

impl<S: KeyValueStore> RecordStore<S> {
    /// Fills each of the five collections with demonstration records if, and
    /// only if, it is currently empty. Safe to call on every start.
    pub async fn initialize(&self, today: NaiveDate) -> Result<(), StorageError> {
        // the first demo patient is registered today
        if self.seed_if_empty(keys::PATIENTS, || demo_patients(today)).await? {
            info!("seeded demonstration patients");
        }
        if self.seed_if_empty(keys::PRESCRIPTIONS, demo_prescriptions).await? {
            info!("seeded demonstration prescriptions");
        }
        if self.seed_if_empty(keys::REPORTS, demo_reports).await? {
            info!("seeded demonstration reports");
        }
        if self.seed_if_empty(keys::MEDICINE_BILLS, demo_medicine_bills).await? {
            info!("seeded demonstration medicine bills");
        }
        if self.seed_if_empty(keys::HOSPITAL_BILLS, demo_hospital_bills).await? {
            info!("seeded demonstration hospital bills");
        }
        Ok(())
    }
}

pub fn demo_patients(today: NaiveDate) -> Vec<Patient> {
    let today = date_string(today);
    vec![
        Patient {
            id: "1".into(),
            name: "Rajesh Kumar".into(),
            age: 45,
            gender: Gender::Male,
            phone: "+91 98765 43210".into(),
            email: "rajesh.kumar@email.com".into(),
            address: "123 MG Road, Mumbai, Maharashtra".into(),
            condition: "Hypertension".into(),
            last_visit: today.clone(),
            avatar: AVATAR_RAJESH.into(),
            blood_group: Some("B+".into()),
            emergency_contact: Some("+91 87654 32109".into()),
            allergies: vec!["Penicillin".into()],
            created_at: Some(today),
        },
        Patient {
            id: "2".into(),
            name: "Priya Sharma".into(),
            age: 32,
            gender: Gender::Female,
            phone: "+91 87654 32109".into(),
            email: "priya.sharma@email.com".into(),
            address: "456 Park Street, Delhi, India".into(),
            condition: "Diabetes".into(),
            last_visit: "2024-01-12".into(),
            avatar: AVATAR_PRIYA.into(),
            blood_group: Some("A+".into()),
            emergency_contact: Some("+91 76543 21098".into()),
            allergies: Vec::new(),
            created_at: Some("2024-01-12".into()),
        },
        Patient {
            id: "3".into(),
            name: "Amit Patel".into(),
            age: 28,
            gender: Gender::Male,
            phone: "+91 76543 21098".into(),
            email: "amit.patel@email.com".into(),
            address: "789 FC Road, Pune, Maharashtra".into(),
            condition: "Asthma".into(),
            last_visit: "2024-01-10".into(),
            avatar: AVATAR_AMIT.into(),
            blood_group: Some("O+".into()),
            emergency_contact: Some("+91 98765 43210".into()),
            allergies: vec!["Dust".into(), "Pollen".into()],
            created_at: Some("2024-01-10".into()),
        },
    ]
}

fn medication(name: &str, dosage: &str, frequency: &str, duration: &str) -> Medication {
    Medication {
        name: name.into(),
        dosage: dosage.into(),
        frequency: frequency.into(),
        duration: duration.into(),
    }
}

pub fn demo_prescriptions() -> Vec<Prescription> {
    vec![
        Prescription {
            id: "1".into(),
            patient_name: "Rajesh Kumar".into(),
            doctor_name: "Dr. Rajesh Kumar".into(),
            date: "2024-01-15".into(),
            medications: vec![
                medication("Lisinopril", "10mg", "Once daily", "30 days"),
                medication("Metformin", "500mg", "Twice daily", "30 days"),
            ],
            notes: "Take with food. Monitor blood pressure regularly.".into(),
            status: PrescriptionStatus::Active,
        },
        Prescription {
            id: "2".into(),
            patient_name: "Priya Sharma".into(),
            doctor_name: "Dr. Rajesh Kumar".into(),
            date: "2024-01-12".into(),
            medications: vec![medication("Albuterol Inhaler", "90mcg", "As needed", "90 days")],
            notes: "Use before exercise or when experiencing shortness of breath.".into(),
            status: PrescriptionStatus::Active,
        },
    ]
}

pub fn demo_reports() -> Vec<Report> {
    vec![
        Report {
            id: "1".into(),
            patient_name: "Rajesh Kumar".into(),
            report_type: "Blood Test".into(),
            file_name: "blood_test_rajesh_kumar.pdf".into(),
            upload_date: "2024-01-15".into(),
            uploaded_by: "Priya Sharma".into(),
            file_size: "2.3 MB".into(),
            status: ReportStatus::Pending,
            file_uri: None,
        },
        Report {
            id: "2".into(),
            patient_name: "Priya Sharma".into(),
            report_type: "X-Ray".into(),
            file_name: "chest_xray_priya.jpg".into(),
            upload_date: "2024-01-12".into(),
            uploaded_by: "Priya Sharma".into(),
            file_size: "4.1 MB".into(),
            status: ReportStatus::Pending,
            file_uri: None,
        },
    ]
}

fn medicine_line(name: &str, quantity: u32, unit_price: Decimal, total: Decimal) -> MedicineLine {
    MedicineLine {
        name: name.into(),
        quantity,
        unit_price,
        total,
    }
}

pub fn demo_medicine_bills() -> Vec<MedicineBill> {
    vec![MedicineBill {
        id: "1".into(),
        patient_name: "Rajesh Kumar".into(),
        medicines: vec![
            medicine_line("Lisinopril 10mg", 30, Decimal::new(12550, 2), Decimal::new(376500, 2)),
            medicine_line("Metformin 500mg", 60, Decimal::new(6225, 2), Decimal::new(373500, 2)),
        ],
        total_amount: Decimal::new(750000, 2),
        date: "2024-01-15".into(),
        status: BillStatus::Paid,
        pharmacy_name: "Apollo Pharmacy".into(),
    }]
}

pub fn demo_hospital_bills() -> Vec<HospitalBill> {
    vec![HospitalBill {
        id: "1".into(),
        patient_name: "Amit Patel".into(),
        services: vec![
            ServiceLine::new(ServiceType::Consultation, "General Consultation", Decimal::new(75000, 2)),
            ServiceLine::new(ServiceType::Laboratory, "Blood Test Panel", Decimal::new(100000, 2)),
            ServiceLine::new(ServiceType::Radiology, "Chest X-Ray", Decimal::new(60000, 2)),
        ],
        doctor_fees: Decimal::new(75000, 2),
        total_amount: Decimal::new(310000, 2),
        date: "2024-01-10".into(),
        status: BillStatus::Paid,
        admission_date: Some("2024-01-10".into()),
        discharge_date: Some("2024-01-10".into()),
    }]
}
