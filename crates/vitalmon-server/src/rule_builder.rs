use anyhow::Result;
use std::sync::Mutex;
use vitalmon_alert::engine::AlertEngine;
use vitalmon_alert::rules::RuleKind;
use vitalmon_alert::AlertRule;

use crate::config::{AlertConfig, ServerConfig};

/// Builds the configured rules, skipping names that match no rule type.
pub fn build_rules_from_config(config: &AlertConfig) -> Vec<Box<dyn AlertRule>> {
    let mut rules = Vec::with_capacity(config.rules.len());
    for name in &config.rules {
        match name.parse::<RuleKind>() {
            Ok(kind) => rules.push(kind.build()),
            Err(e) => {
                tracing::warn!(rule_type = %name, error = %e, "Skipping invalid alert rule");
            }
        }
    }
    rules
}

// ---- Engine reload ----

/// Swaps the engine's rules for the ones configured in `config`. Returns the
/// number of loaded rules. Alerts already logged are kept.
pub fn apply_alert_config(config: &AlertConfig, alert_engine: &Mutex<AlertEngine>) -> usize {
    let rules = build_rules_from_config(config);
    let count = rules.len();

    let mut engine = alert_engine
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    engine.replace_rules(rules);

    tracing::info!(rule_count = count, "Alert engine rules applied");
    count
}

/// Re-reads the config file and reloads the engine's rules from it.
pub fn reload_alert_engine(config_path: &str, alert_engine: &Mutex<AlertEngine>) -> Result<usize> {
    let config = ServerConfig::load(config_path)?;
    Ok(apply_alert_config(&config.alert, alert_engine))
}
