use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role chosen at sign-in. Decides which tabs and records a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Receptionist,
    Doctor,
    Patient,
}

/// Screens reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Patients,
    Prescriptions,
    Reports,
    Billing,
    Profile,
}

impl Role {
    pub fn tabs(&self) -> &'static [Tab] {
        match self {
            Role::Receptionist => &[Tab::Dashboard, Tab::Patients, Tab::Billing, Tab::Reports, Tab::Profile],
            Role::Doctor => &[Tab::Dashboard, Tab::Patients, Tab::Prescriptions, Tab::Billing, Tab::Profile],
            Role::Patient => &[Tab::Dashboard, Tab::Prescriptions, Tab::Reports, Tab::Billing, Tab::Profile],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Receptionist => "receptionist",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "receptionist" => Ok(Role::Receptionist),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
