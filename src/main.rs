use chrono::Local;
use hospital_records::clinic::{compute_stats, initialize_appointments};
use hospital_records::config::Config;
use hospital_records::database::{RecordStore, Session, SqliteStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    // Local store, created on first run
    let store = RecordStore::new(SqliteStore::connect(&config.database_url).await?);
    info!("record store open at {}", config.database_url);

    let today = Local::now().date_naive();
    store.initialize(today).await?;
    initialize_appointments(&store, today).await?;

    match Session::restore(&store).await? {
        Some(session) => info!("signed in as {} ({})", session.user().name, session.role()),
        None => info!("no stored session"),
    }

    let stats = compute_stats(&store, today).await;
    info!("dashboard: {}", stats);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
