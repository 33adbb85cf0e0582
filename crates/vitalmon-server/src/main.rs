use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::signal;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;
use vitalmon_storage::RecordStore;

use vitalmon_server::config;
use vitalmon_server::monitor;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vitalmon-server [config.toml]    Start the monitor (default: config/server.toml)");
    eprintln!("  vitalmon-server --help           Show this message");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vitalmon=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        _ => {
            let config_path = args
                .get(1)
                .map(|s| s.as_str())
                .unwrap_or("config/server.toml");
            run_server(config_path).await
        }
    }
}

async fn run_server(config_path: &str) -> Result<()> {
    let config = config::ServerConfig::load(config_path)?;

    tracing::info!(
        evaluation_interval_secs = config.evaluation_interval_secs,
        lookback_secs = config.lookback_secs,
        rules = ?config.alert.rules,
        "vitalmon-server starting"
    );

    let store = Arc::new(RecordStore::new());
    if let Err(e) = monitor::load_initial_data(&config, &store) {
        tracing::error!(error = %e, "Failed to load initial measurement files");
    }

    let alert_engine = Arc::new(Mutex::new(monitor::build_engine(&config, store.clone())));

    let evaluation_handle = monitor::spawn_evaluation_loop(
        alert_engine.clone(),
        Duration::from_secs(config.evaluation_interval_secs),
    );

    let reload_handle = if config.alert.rules_reload_secs > 0 {
        Some(monitor::spawn_rule_reload_loop(
            config_path.to_string(),
            alert_engine.clone(),
            Duration::from_secs(config.alert.rules_reload_secs),
        ))
    } else {
        tracing::info!("Periodic rule reload disabled");
        None
    };

    signal::ctrl_c().await?;
    tracing::info!("Shutting down gracefully");

    evaluation_handle.abort();
    if let Some(h) = reload_handle {
        h.abort();
    }

    let alert_count = alert_engine
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .alert_count();
    tracing::info!(
        patients = store.patient_count(),
        alerts = alert_count,
        "vitalmon-server stopped"
    );
    Ok(())
}
