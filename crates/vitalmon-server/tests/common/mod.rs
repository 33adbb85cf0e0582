#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vitalmon_alert::engine::AlertEngine;
use vitalmon_server::config::ServerConfig;
use vitalmon_server::monitor;
use vitalmon_storage::RecordStore;

pub const NOW: i64 = 1_700_000_000_000;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: String,
    pub store: Arc<RecordStore>,
    pub engine: Arc<Mutex<AlertEngine>>,
}

/// Writes `config` to a temp dir (with `data_dir` pointing at a `data/`
/// subdirectory holding `files`), loads it and builds the engine.
pub fn build_test_context(config: &str, files: &[(&str, &str)]) -> Result<TestContext> {
    let temp_dir = tempfile::tempdir()?;
    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir(&data_dir)?;
    for (name, content) in files {
        std::fs::write(data_dir.join(name), content)?;
    }

    let config_path = temp_dir.path().join("server.toml");
    write_config(&config_path, config, &data_dir)?;
    let config_path = config_path.to_string_lossy().into_owned();

    let config = ServerConfig::load(&config_path)?;
    let store = Arc::new(RecordStore::new());
    monitor::load_initial_data(&config, &store)?;
    let engine = Arc::new(Mutex::new(monitor::build_engine(&config, store.clone())));

    Ok(TestContext {
        temp_dir,
        config_path,
        store,
        engine,
    })
}

pub fn write_config(path: &Path, config: &str, data_dir: &Path) -> Result<()> {
    let content = format!(
        "{config}\n[ingest]\ndata_dir = {:?}\n",
        data_dir.to_string_lossy()
    );
    std::fs::write(path, content)?;
    Ok(())
}

/// One line in the labelled file format.
pub fn line(patient_id: i32, timestamp: i64, label: &str, data: &str) -> String {
    format!("Patient ID: {patient_id}, Timestamp: {timestamp}, Label: {label}, Data: {data}\n")
}
