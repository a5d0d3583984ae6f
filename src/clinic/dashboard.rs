//! Counts for the dashboard cards, derived from the stored collections.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::forms::date_string;
use super::models::{Appointment, AppointmentStatus, AppointmentType, DashboardStats, Patient, Report, ReportStatus};
use crate::database::{keys, KeyValueStore, RecordStore, StorageError};

/// Seeds three scheduled appointments, two `today` and one the day after,
/// when the appointments collection is empty.
pub async fn initialize_appointments<S: KeyValueStore>(
    store: &RecordStore<S>,
    today: NaiveDate,
) -> Result<(), StorageError> {
    if store.seed_if_empty(keys::APPOINTMENTS, || demo_appointments(today)).await? {
        info!("seeded demonstration appointments");
    }
    Ok(())
}

pub fn demo_appointments(today: NaiveDate) -> Vec<Appointment> {
    let tomorrow = today.succ_opt().unwrap_or(today);
    let today = date_string(today);
    let slot = |id: &str, name: &str, date: String, time: &str, kind: AppointmentType| Appointment {
        id: id.into(),
        patient_id: id.into(),
        patient_name: name.into(),
        doctor_name: "Dr. Rajesh Kumar".into(),
        date,
        time: time.into(),
        appointment_type: kind,
        status: AppointmentStatus::Scheduled,
        created_at: today.clone(),
    };
    vec![
        slot("1", "Rajesh Kumar", today.clone(), "10:00 AM", AppointmentType::Consultation),
        slot("2", "Priya Sharma", today.clone(), "11:30 AM", AppointmentType::FollowUp),
        slot("3", "Amit Patel", date_string(tomorrow), "09:00 AM", AppointmentType::Consultation),
    ]
}

/// Appointments on `today` that have not been cancelled.
pub fn today_appointments(appointments: &[Appointment], today: NaiveDate) -> usize {
    let today = date_string(today);
    appointments
        .iter()
        .filter(|a| a.date == today && a.status != AppointmentStatus::Cancelled)
        .count()
}

pub fn pending_reports(reports: &[Report]) -> usize {
    reports.iter().filter(|r| r.status == ReportStatus::Pending).count()
}

/// Patients registered on `today`. Records without `created_at` fall back to
/// `last_visit`.
pub fn new_registrations(patients: &[Patient], today: NaiveDate) -> usize {
    let today = date_string(today);
    patients
        .iter()
        .filter(|p| p.created_at.as_deref().unwrap_or(&p.last_visit) == today)
        .count()
}

/// Non-cancelled appointments from `today` onwards, soonest first.
pub fn upcoming_appointments(appointments: &[Appointment], today: NaiveDate) -> Vec<&Appointment> {
    let today = date_string(today);
    let mut upcoming: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.date >= today && a.status != AppointmentStatus::Cancelled)
        .collect();
    upcoming.sort_by_key(|a| (a.date.clone(), clock_minutes(&a.time)));
    upcoming
}

// "09:00 AM" -> minutes since midnight; unparsable times sort last
fn clock_minutes(time: &str) -> u32 {
    let parse = || -> Option<u32> {
        let (clock, meridiem) = time.trim().split_once(' ')?;
        let (h, m) = clock.split_once(':')?;
        let (h, m): (u32, u32) = (h.parse().ok()?, m.parse().ok()?);
        let h = match meridiem.to_ascii_uppercase().as_str() {
            "AM" => h % 12,
            "PM" => h % 12 + 12,
            _ => return None,
        };
        Some(h * 60 + m)
    };
    parse().unwrap_or(u32::MAX)
}

/// Reads patients, reports and appointments and counts them. Never fails:
/// any read error is logged and yields all-zero stats.
pub async fn compute_stats<S: KeyValueStore>(store: &RecordStore<S>, today: NaiveDate) -> DashboardStats {
    match try_compute_stats(store, today).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("Error calculating dashboard stats: {}", e);
            DashboardStats::default()
        }
    }
}

pub async fn compute_stats_now<S: KeyValueStore>(store: &RecordStore<S>) -> DashboardStats {
    compute_stats(store, Local::now().date_naive()).await
}

async fn try_compute_stats<S: KeyValueStore>(
    store: &RecordStore<S>,
    today: NaiveDate,
) -> Result<DashboardStats, StorageError> {
    let (patients, reports, appointments) = tokio::try_join!(
        store.load_patients(),
        store.load_reports(),
        store.load_appointments()
    )?;

    Ok(DashboardStats {
        total_patients: patients.len(),
        today_appointments: today_appointments(&appointments, today),
        pending_reports: pending_reports(&reports),
        new_registrations: new_registrations(&patients, today),
    })
}
