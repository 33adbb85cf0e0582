use anyhow::Result;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use vitalmon_alert::engine::AlertEngine;
use vitalmon_common::types::{Alert, Severity};
use vitalmon_storage::reader::{FileDataReader, IngestStats};
use vitalmon_storage::RecordStore;

use crate::config::ServerConfig;
use crate::rule_builder;

/// Builds an engine over `store` with the configured rules and look-back.
pub fn build_engine(config: &ServerConfig, store: Arc<RecordStore>) -> AlertEngine {
    let rules = rule_builder::build_rules_from_config(&config.alert);
    AlertEngine::new(store, rules).with_lookback_ms(config.lookback_ms())
}

/// Loads the configured sample directory into the store, if any.
pub fn load_initial_data(config: &ServerConfig, store: &RecordStore) -> Result<Option<IngestStats>> {
    match &config.ingest.data_dir {
        Some(dir) => FileDataReader::new(dir).read_all(store).map(Some),
        None => Ok(None),
    }
}

pub fn log_alert(alert: &Alert) {
    match alert.severity() {
        Severity::Critical => tracing::error!(
            patient_id = %alert.patient_id,
            condition = %alert.condition,
            timestamp = alert.timestamp,
            "Critical alert"
        ),
        Severity::Warning => tracing::warn!(
            patient_id = %alert.patient_id,
            condition = %alert.condition,
            timestamp = alert.timestamp,
            "Warning alert"
        ),
        Severity::Info => tracing::info!(
            patient_id = %alert.patient_id,
            condition = %alert.condition,
            timestamp = alert.timestamp,
            "Alert"
        ),
    }
}

pub fn run_evaluation_tick(alert_engine: &Mutex<AlertEngine>) -> Vec<Alert> {
    run_evaluation_tick_at(alert_engine, Utc::now().timestamp_millis())
}

/// One evaluation pass over every known patient. Fired alerts are logged by
/// severity and returned.
pub fn run_evaluation_tick_at(alert_engine: &Mutex<AlertEngine>, now_ms: i64) -> Vec<Alert> {
    let fired = {
        let mut engine = alert_engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        engine.evaluate_all_at(now_ms)
    };
    for alert in &fired {
        log_alert(alert);
    }
    fired
}

pub fn spawn_evaluation_loop(
    alert_engine: Arc<Mutex<AlertEngine>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(period);
        loop {
            tick.tick().await;
            let fired = run_evaluation_tick(&alert_engine);
            if !fired.is_empty() {
                tracing::info!(fired = fired.len(), "Evaluation pass raised alerts");
            }
        }
    })
}

pub fn spawn_rule_reload_loop(
    config_path: String,
    alert_engine: Arc<Mutex<AlertEngine>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(period);
        // first tick fires immediately; rules were just loaded at startup
        tick.tick().await;
        loop {
            tick.tick().await;
            if let Err(e) = rule_builder::reload_alert_engine(&config_path, &alert_engine) {
                tracing::error!(error = %e, config = %config_path, "Failed to reload alert rules");
            }
        }
    })
}
