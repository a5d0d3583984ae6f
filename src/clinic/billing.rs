use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::forms::{date_string, generate_id};
use super::models::{BillStatus, HospitalBill, MedicineBill, MedicineLine, ServiceLine, ServiceType};

/// An amount left the range `Decimal` can represent. The bill being edited
/// is left as it was before the failing call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("line total overflowed for {name}")]
    LineOverflow { name: String },
    #[error("bill total overflowed")]
    TotalOverflow,
}

fn line_total(name: &str, quantity: u32, unit_price: Decimal) -> Result<Decimal, BillingError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| BillingError::LineOverflow { name: name.to_string() })
}

fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, BillingError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(BillingError::TotalOverflow)
}

impl MedicineLine {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Result<Self, BillingError> {
        let name = name.into();
        let total = line_total(&name, quantity, unit_price)?;
        Ok(MedicineLine {
            name,
            quantity,
            unit_price,
            total,
        })
    }
}

impl MedicineBill {
    /// New pharmacy bill dated `today`, pending payment.
    pub fn new(
        patient_name: impl Into<String>,
        pharmacy_name: impl Into<String>,
        medicines: Vec<MedicineLine>,
        today: NaiveDate,
    ) -> Result<Self, BillingError> {
        let mut bill = MedicineBill {
            id: generate_id(),
            patient_name: patient_name.into(),
            medicines,
            total_amount: Decimal::ZERO,
            date: date_string(today),
            status: BillStatus::Pending,
            pharmacy_name: pharmacy_name.into(),
        };
        bill.recompute_totals()?;
        Ok(bill)
    }

    pub fn add_medicine(&mut self, line: MedicineLine) -> Result<(), BillingError> {
        self.medicines.push(line);
        if let Err(err) = self.recompute_totals() {
            self.medicines.pop();
            return Err(err);
        }
        Ok(())
    }

    pub fn remove_medicine(&mut self, index: usize) -> Result<Option<MedicineLine>, BillingError> {
        if index >= self.medicines.len() {
            return Ok(None);
        }
        let line = self.medicines.remove(index);
        if let Err(err) = self.recompute_totals() {
            self.medicines.insert(index, line);
            return Err(err);
        }
        Ok(Some(line))
    }

    /// Re-derives every line total and the bill total from quantities and
    /// unit prices. Call after editing lines in place. Nothing is written
    /// unless every total fits.
    pub fn recompute_totals(&mut self) -> Result<(), BillingError> {
        let totals = self
            .medicines
            .iter()
            .map(|m| line_total(&m.name, m.quantity, m.unit_price))
            .collect::<Result<Vec<_>, _>>()?;
        let total_amount = checked_sum(totals.iter().copied())?;
        for (line, total) in self.medicines.iter_mut().zip(totals) {
            line.total = total;
        }
        self.total_amount = total_amount;
        Ok(())
    }

    pub fn is_balanced(&self) -> bool {
        let lines_ok = self
            .medicines
            .iter()
            .all(|m| line_total(&m.name, m.quantity, m.unit_price) == Ok(m.total));
        lines_ok && checked_sum(self.medicines.iter().map(|m| m.total)) == Ok(self.total_amount)
    }

    pub fn summary(&self) -> String {
        let mut text = format!("Medicine bill #{} for {}\n", self.id, self.patient_name);
        for m in &self.medicines {
            text.push_str(&format!(
                "- {} (x{}) @ ₹{:.2} = ₹{:.2}\n",
                m.name, m.quantity, m.unit_price, m.total
            ));
        }
        text.push_str(&format!("Total: ₹{:.2}", self.total_amount));
        text
    }
}

impl ServiceLine {
    pub fn new(service_type: ServiceType, description: impl Into<String>, amount: Decimal) -> Self {
        ServiceLine {
            service_type,
            description: description.into(),
            amount,
        }
    }
}

impl HospitalBill {
    pub fn new(
        patient_name: impl Into<String>,
        services: Vec<ServiceLine>,
        doctor_fees: Decimal,
        today: NaiveDate,
    ) -> Result<Self, BillingError> {
        let mut bill = HospitalBill {
            id: generate_id(),
            patient_name: patient_name.into(),
            services,
            doctor_fees,
            total_amount: Decimal::ZERO,
            date: date_string(today),
            status: BillStatus::Pending,
            admission_date: None,
            discharge_date: None,
        };
        bill.recompute_totals()?;
        Ok(bill)
    }

    pub fn with_stay(mut self, admission: Option<String>, discharge: Option<String>) -> Self {
        // blank form fields mean no stay
        self.admission_date = admission.filter(|d| !d.is_empty());
        self.discharge_date = discharge.filter(|d| !d.is_empty());
        self
    }

    pub fn add_service(&mut self, line: ServiceLine) -> Result<(), BillingError> {
        self.services.push(line);
        if let Err(err) = self.recompute_totals() {
            self.services.pop();
            return Err(err);
        }
        Ok(())
    }

    pub fn remove_service(&mut self, index: usize) -> Result<Option<ServiceLine>, BillingError> {
        if index >= self.services.len() {
            return Ok(None);
        }
        let line = self.services.remove(index);
        if let Err(err) = self.recompute_totals() {
            self.services.insert(index, line);
            return Err(err);
        }
        Ok(Some(line))
    }

    pub fn set_doctor_fees(&mut self, fees: Decimal) -> Result<(), BillingError> {
        let previous = std::mem::replace(&mut self.doctor_fees, fees);
        if let Err(err) = self.recompute_totals() {
            self.doctor_fees = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn recompute_totals(&mut self) -> Result<(), BillingError> {
        self.total_amount = self.expected_total()?;
        Ok(())
    }

    pub fn services_total(&self) -> Result<Decimal, BillingError> {
        checked_sum(self.services.iter().map(|s| s.amount))
    }

    fn expected_total(&self) -> Result<Decimal, BillingError> {
        self.services_total()?
            .checked_add(self.doctor_fees)
            .ok_or(BillingError::TotalOverflow)
    }

    pub fn is_balanced(&self) -> bool {
        self.expected_total() == Ok(self.total_amount)
    }

    pub fn summary(&self) -> String {
        let mut text = format!("Hospital bill #{} for {}\n", self.id, self.patient_name);
        for s in &self.services {
            text.push_str(&format!("- {}: ₹{:.2}\n", s.description, s.amount));
        }
        text.push_str(&format!("Doctor fees: ₹{:.2}\n", self.doctor_fees));
        text.push_str(&format!("Total: ₹{:.2}", self.total_amount));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn line(name: &str, quantity: u32, unit_price: Decimal) -> MedicineLine {
        MedicineLine::new(name, quantity, unit_price).unwrap()
    }

    #[test]
    fn two_at_fifty_is_one_hundred() {
        let bill = MedicineBill::new("Rajesh Kumar", "Apollo Pharmacy", vec![line("A", 2, Decimal::from(50))], day()).unwrap();
        assert_eq!(bill.total_amount, Decimal::new(10000, 2));
        assert_eq!(bill.medicines[0].total, Decimal::from(100));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.date, "2024-03-01");
        assert!(bill.is_balanced());
    }

    #[test]
    fn medicine_edits_keep_totals_in_step() {
        let mut bill = MedicineBill::new("P", "Apollo Pharmacy", vec![line("A", 1, Decimal::new(1250, 2))], day()).unwrap();
        bill.add_medicine(line("B", 3, Decimal::new(200, 2))).unwrap();
        assert_eq!(bill.total_amount, Decimal::new(1850, 2));

        bill.medicines[0].quantity = 4;
        assert!(!bill.is_balanced());
        bill.recompute_totals().unwrap();
        assert_eq!(bill.total_amount, Decimal::new(5600, 2));
        assert!(bill.is_balanced());

        assert_eq!(bill.remove_medicine(5), Ok(None));
        let removed = bill.remove_medicine(0).unwrap().unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(bill.total_amount, Decimal::new(600, 2));
    }

    #[test]
    fn hospital_total_adds_doctor_fees() {
        let mut bill = HospitalBill::new(
            "Amit Patel",
            vec![
                ServiceLine::new(ServiceType::Consultation, "General Consultation", Decimal::from(750)),
                ServiceLine::new(ServiceType::Laboratory, "Blood Test Panel", Decimal::from(1000)),
                ServiceLine::new(ServiceType::Radiology, "Chest X-Ray", Decimal::from(600)),
            ],
            Decimal::from(750),
            day(),
        )
        .unwrap();
        assert_eq!(bill.total_amount, Decimal::from(3100));

        bill.set_doctor_fees(Decimal::from(250)).unwrap();
        assert_eq!(bill.total_amount, Decimal::from(2600));
        bill.remove_service(1).unwrap();
        assert_eq!(bill.total_amount, Decimal::from(1600));
        assert_eq!(bill.services_total(), Ok(Decimal::from(1350)));
        assert!(bill.is_balanced());
    }

    #[test]
    fn oversized_line_is_rejected() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(24), 0);
        let err = MedicineLine::new("A", 100_000, huge).unwrap_err();
        assert_eq!(err, BillingError::LineOverflow { name: "A".into() });
    }

    #[test]
    fn overflowing_edits_leave_the_bill_unchanged() {
        let mut bill = MedicineBill::new("P", "Apollo Pharmacy", vec![line("A", 1, Decimal::MAX)], day()).unwrap();
        assert_eq!(bill.add_medicine(line("B", 1, Decimal::ONE)), Err(BillingError::TotalOverflow));
        assert_eq!(bill.medicines.len(), 1);
        assert_eq!(bill.total_amount, Decimal::MAX);

        bill.medicines[0].quantity = 2;
        assert!(bill.recompute_totals().is_err());
        assert_eq!(bill.medicines[0].total, Decimal::MAX);
        assert!(!bill.is_balanced());

        let mut hospital = HospitalBill::new("P", vec![ServiceLine::new(ServiceType::Surgery, "S", Decimal::MAX)], Decimal::ZERO, day()).unwrap();
        assert_eq!(hospital.set_doctor_fees(Decimal::ONE), Err(BillingError::TotalOverflow));
        assert_eq!(hospital.doctor_fees, Decimal::ZERO);
        assert!(hospital.add_service(ServiceLine::new(ServiceType::Other, "O", Decimal::ONE)).is_err());
        assert_eq!(hospital.services.len(), 1);
        assert!(hospital.is_balanced());
    }

    #[test]
    fn blank_stay_dates_are_dropped() {
        let bill = HospitalBill::new("P", vec![], Decimal::ZERO, day())
            .unwrap()
            .with_stay(Some(String::new()), Some("2024-03-02".into()));
        assert_eq!(bill.admission_date, None);
        assert_eq!(bill.discharge_date.as_deref(), Some("2024-03-02"));
    }

    #[test]
    fn summary_lists_lines_and_total() {
        let bill = MedicineBill::new("P", "Apollo Pharmacy", vec![line("Metformin 500mg", 60, Decimal::new(6225, 2))], day()).unwrap();
        let text = bill.summary();
        assert!(text.contains("Metformin 500mg (x60)"));
        assert!(text.ends_with("Total: ₹3735.00"));
    }
}
