use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hospital.db?mode=rwc";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for the binary. The library never reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
}

impl Config {
    /// Loads `.env` if present, then reads `HOSPITAL_DATABASE_URL` and
    /// `RUST_LOG`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            database_url: lookup("HOSPITAL_DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            log_filter: lookup("RUST_LOG")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
