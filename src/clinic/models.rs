use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::forms::allergies_from_field;
use super::states::Role;

/// Anything stored in a collection is addressed by its string id.
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(Patient, Prescription, Report, MedicineBill, HospitalBill, Appointment, User);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Patient chart as shown on the patients screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub condition: String,
    pub last_visit: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    // Older builds stored a comma-joined string here.
    #[serde(default, deserialize_with = "deserialize_allergies")]
    pub allergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AllergyField {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_allergies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AllergyField>::deserialize(deserializer)? {
        Some(AllergyField::List(items)) => items,
        Some(AllergyField::Joined(text)) => allergies_from_field(&text),
        None => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrescriptionStatus {
    Active,
    Completed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub medications: Vec<Medication>,
    pub notes: String,
    pub status: PrescriptionStatus,
}

/// Review state of an uploaded report. Parsing ignores case, so legacy
/// `"pending"` and `"Pending"` land on the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Archived,
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "reviewed" => Ok(ReportStatus::Reviewed),
            "archived" => Ok(ReportStatus::Archived),
            _ => Err(format!("unknown report status: {}", s)),
        }
    }
}

impl TryFrom<String> for ReportStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub patient_name: String,
    pub report_type: String,
    pub file_name: String,
    pub upload_date: String,
    pub uploaded_by: String,
    pub file_size: String,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Paid,
    Pending,
    Overdue,
}

/// One dispensed medicine; `total` is always `quantity * unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineLine {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineBill {
    pub id: String,
    pub patient_name: String,
    pub medicines: Vec<MedicineLine>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,
    pub date: String,
    pub status: BillStatus,
    pub pharmacy_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Consultation,
    Radiology,
    Laboratory,
    Surgery,
    #[serde(rename = "Room Charges")]
    RoomCharges,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalBill {
    pub id: String,
    pub patient_name: String,
    pub services: Vec<ServiceLine>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub doctor_fees: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,
    pub date: String,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentType {
    Consultation,
    #[serde(rename = "Follow-up")]
    FollowUp,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Appointment linked to a patient by `patient_id`. The link is never
/// checked against the patients collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub created_at: String,
}

/// Signed-in user, persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial profile edit applied by `Session::update`.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub today_appointments: usize,
    pub pending_reports: usize,
    pub new_registrations: usize,
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "patients={} today_appointments={} pending_reports={} new_registrations={}",
            self.total_patients, self.today_appointments, self.pending_reports, self.new_registrations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patient_uses_camel_case_on_the_wire() {
        let raw = json!({
            "id": "7",
            "name": "Asha",
            "age": 40,
            "gender": "Female",
            "phone": "1",
            "email": "a@b.c",
            "address": "x",
            "condition": "Flu",
            "lastVisit": "2024-02-01",
            "avatar": "",
            "bloodGroup": "O-",
            "allergies": ["Latex"]
        });
        let patient: Patient = serde_json::from_value(raw).unwrap();
        assert_eq!(patient.last_visit, "2024-02-01");
        assert_eq!(patient.blood_group.as_deref(), Some("O-"));
        assert_eq!(patient.created_at, None);

        let back = serde_json::to_value(&patient).unwrap();
        assert_eq!(back["lastVisit"], "2024-02-01");
        assert!(back.get("createdAt").is_none());
    }

    #[test]
    fn allergies_accept_joined_string_and_missing_field() {
        let joined: Patient = serde_json::from_value(json!({
            "id": "1", "name": "n", "age": 1, "gender": "Other", "phone": "", "email": "",
            "address": "", "condition": "", "lastVisit": "", "avatar": "",
            "allergies": "Dust, Pollen"
        }))
        .unwrap();
        assert_eq!(joined.allergies, vec!["Dust", "Pollen"]);

        let missing: Patient = serde_json::from_value(json!({
            "id": "1", "name": "n", "age": 1, "gender": "Other", "phone": "", "email": "",
            "address": "", "condition": "", "lastVisit": "", "avatar": ""
        }))
        .unwrap();
        assert!(missing.allergies.is_empty());
    }

    #[test]
    fn report_status_ignores_case() {
        let pending: ReportStatus = serde_json::from_value(json!("pending")).unwrap();
        let shouting: ReportStatus = serde_json::from_value(json!("REVIEWED")).unwrap();
        assert_eq!(pending, ReportStatus::Pending);
        assert_eq!(shouting, ReportStatus::Reviewed);
        assert!(serde_json::from_value::<ReportStatus>(json!("lost")).is_err());
        assert_eq!(serde_json::to_value(ReportStatus::Archived).unwrap(), json!("Archived"));
    }

    #[test]
    fn renamed_variants_match_stored_strings() {
        assert_eq!(serde_json::to_value(AppointmentType::FollowUp).unwrap(), json!("Follow-up"));
        assert_eq!(serde_json::to_value(ServiceType::RoomCharges).unwrap(), json!("Room Charges"));
    }

    #[test]
    fn money_is_stored_as_an_exact_json_number() {
        let line = MedicineLine {
            name: "A".into(),
            quantity: 3,
            unit_price: Decimal::new(1234567890123456789, 4),
            total: Decimal::new(3703703670370370367, 4),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains(r#""unitPrice":123456789012345.6789"#), "{json}");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["total"].is_number());
        let back: MedicineLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
