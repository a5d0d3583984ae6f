//! Local record store and dashboard statistics for a hospital front desk.
//!
//! Collections of patients, prescriptions, reports, bills and appointments
//! live as JSON arrays under fixed keys of an on-device key-value store
//! (SQLite through `sqlx`). Screens load a whole collection, change it, and
//! save it back.

pub mod clinic;
pub mod config;
pub mod database;
