mod common;

use anyhow::Result;
use common::{build_test_context, line, write_config, NOW};
use tokio::time::Duration;
use vitalmon_common::types::{Condition, RecordKind, Severity};
use vitalmon_server::monitor;
use vitalmon_server::rule_builder;

#[test]
fn loaded_files_raise_alerts_on_tick() -> Result<()> {
    let saturation = [
        line(1, NOW - 2_000, "Saturation", "91.0%"),
        line(2, NOW - 2_000, "Saturation", "98.0%"),
        "Patient ID: x, Timestamp: 1, Label: Saturation, Data: 97%\n".to_string(),
    ]
    .concat();
    let systolic = [
        line(1, NOW - 1_000, "SystolicPressure", "89.0"),
        line(2, NOW - 1_000, "SystolicPressure", "120.0"),
    ]
    .concat();
    let ctx = build_test_context(
        "",
        &[("Saturation.txt", saturation.as_str()), ("SystolicPressure.txt", systolic.as_str())],
    )?;

    assert_eq!(ctx.store.all_patients(), vec![1, 2]);
    assert_eq!(ctx.store.record_count(1), 2);

    let fired = monitor::run_evaluation_tick_at(&ctx.engine, NOW);
    let conditions: Vec<Condition> = fired.iter().map(|a| a.condition).collect();
    assert_eq!(
        conditions,
        vec![
            Condition::CriticalSystolicPressure,
            Condition::LowSaturation,
            Condition::HypotensiveHypoxemia,
        ]
    );
    assert!(fired.iter().all(|a| a.patient_id == "1"));
    assert_eq!(fired[0].severity(), Severity::Critical);
    Ok(())
}

#[test]
fn configured_lookback_limits_window() -> Result<()> {
    let systolic = [
        line(1, NOW - 120_000, "SystolicPressure", "200.0"),
        line(1, NOW - 1_000, "SystolicPressure", "120.0"),
    ]
    .concat();
    let ctx = build_test_context(
        "lookback_secs = 60",
        &[("SystolicPressure.txt", systolic.as_str())],
    )?;

    assert!(monitor::run_evaluation_tick_at(&ctx.engine, NOW).is_empty());
    Ok(())
}

#[test]
fn reload_swaps_rules_and_keeps_log() -> Result<()> {
    let ecg = [0.5, 0.5, 0.5, 0.5, 0.85]
        .iter()
        .enumerate()
        .map(|(i, v)| line(7, NOW - 10_000 + i as i64, "ECG", &v.to_string()))
        .collect::<String>();
    let ctx = build_test_context("[alert]\nrules = [\"heart_rate\"]", &[("ECG.txt", ecg.as_str())])?;

    let fired = monitor::run_evaluation_tick_at(&ctx.engine, NOW);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].condition, Condition::SignificantEcgPeak);

    let data_dir = ctx.temp_dir.path().join("data");
    write_config(
        std::path::Path::new(&ctx.config_path),
        "[alert]\nrules = [\"blood_pressure\"]",
        &data_dir,
    )?;
    assert_eq!(rule_builder::reload_alert_engine(&ctx.config_path, &ctx.engine)?, 1);

    ctx.store.append(7, 190.0, RecordKind::SystolicPressure, NOW);
    let fired = monitor::run_evaluation_tick_at(&ctx.engine, NOW);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].condition, Condition::CriticalSystolicPressure);

    let engine = ctx.engine.lock().unwrap();
    assert_eq!(engine.alert_count(), 2);
    assert_eq!(
        engine.alert_at(0).map(|a| a.condition),
        Some(Condition::SignificantEcgPeak)
    );
    Ok(())
}

#[test]
fn reload_of_missing_config_fails_without_touching_rules() -> Result<()> {
    let ctx = build_test_context("", &[])?;
    let missing = ctx.temp_dir.path().join("nope.toml");
    assert!(rule_builder::reload_alert_engine(&missing.to_string_lossy(), &ctx.engine).is_err());
    assert_eq!(ctx.engine.lock().unwrap().rules().len(), 4);
    Ok(())
}

#[tokio::test]
async fn evaluation_loop_runs_on_interval() -> Result<()> {
    let ctx = build_test_context("", &[])?;
    let now = chrono::Utc::now().timestamp_millis();
    ctx.store.append(3, 80.0, RecordKind::Saturation, now - 1_000);

    let handle = monitor::spawn_evaluation_loop(ctx.engine.clone(), Duration::from_millis(20));
    let mut logged = 0;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        logged = ctx.engine.lock().unwrap().alert_count();
        if logged >= 2 {
            break;
        }
    }
    handle.abort();

    assert!(logged >= 2);
    let engine = ctx.engine.lock().unwrap();
    assert!(engine
        .alerts()
        .iter()
        .all(|a| a.condition == Condition::LowSaturation && a.patient_id == "3"));
    Ok(())
}
