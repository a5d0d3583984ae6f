// Modules
pub mod access;
pub mod billing;
pub mod dashboard;
pub mod forms;
pub mod models;
pub mod states;

// Re-export the dashboard entry points
pub use dashboard::{compute_stats, compute_stats_now, initialize_appointments};
pub use states::Role;
