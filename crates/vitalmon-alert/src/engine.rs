use crate::AlertRule;
use chrono::Utc;
use std::sync::Arc;
use vitalmon_common::types::{Alert, PatientId};
use vitalmon_storage::RecordStore;

/// Default look-back window: 20 minutes ending at evaluation time.
pub const LOOKBACK_MS: i64 = 1_200_000;

/// Pulls a look-back window per patient from the store, runs every configured
/// rule over it and keeps an append-only log of fired alerts.
pub struct AlertEngine {
    store: Arc<RecordStore>,
    rules: Vec<Box<dyn AlertRule>>,
    lookback_ms: i64,
    log: Vec<Alert>,
}

impl AlertEngine {
    pub fn new(store: Arc<RecordStore>, rules: Vec<Box<dyn AlertRule>>) -> Self {
        Self {
            store,
            rules,
            lookback_ms: LOOKBACK_MS,
            log: Vec::new(),
        }
    }

    pub fn with_lookback_ms(mut self, lookback_ms: i64) -> Self {
        self.lookback_ms = lookback_ms;
        self
    }

    pub fn lookback_ms(&self) -> i64 {
        self.lookback_ms
    }

    pub fn rules(&self) -> &[Box<dyn AlertRule>] {
        &self.rules
    }

    /// Get a rule by its ID.
    pub fn get_rule(&self, id: &str) -> Option<&dyn AlertRule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// Add a new rule at runtime.
    pub fn add_rule(&mut self, rule: Box<dyn AlertRule>) {
        self.rules.push(rule);
    }

    /// Remove a rule by ID. Returns true if found and removed.
    pub fn remove_rule(&mut self, id: &str) -> bool {
        let len_before = self.rules.len();
        self.rules.retain(|r| r.id() != id);
        self.rules.len() < len_before
    }

    /// Replace all rules with a new set. The alert log is left untouched.
    pub fn replace_rules(&mut self, rules: Vec<Box<dyn AlertRule>>) {
        self.rules = rules;
    }

    pub fn evaluate(&mut self, patient_id: PatientId) -> Vec<Alert> {
        self.evaluate_at(patient_id, Utc::now().timestamp_millis())
    }

    /// Evaluates one patient over `[now_ms - lookback, now_ms]`. Every rule
    /// sees the same window; fired alerts are logged in rule order.
    pub fn evaluate_at(&mut self, patient_id: PatientId, now_ms: i64) -> Vec<Alert> {
        let window = self
            .store
            .query(patient_id, now_ms.saturating_sub(self.lookback_ms), now_ms);

        let mut fired = Vec::new();
        for rule in &self.rules {
            if let Some(alert) = rule.evaluate(patient_id, &window) {
                tracing::debug!(
                    rule_id = rule.id(),
                    patient_id,
                    condition = %alert.condition,
                    timestamp = alert.timestamp,
                    "Alert fired"
                );
                fired.push(alert);
            }
        }

        self.log.extend(fired.iter().cloned());
        fired
    }

    pub fn evaluate_all(&mut self) -> Vec<Alert> {
        self.evaluate_all_at(Utc::now().timestamp_millis())
    }

    /// Evaluates every patient known to the store at call time, ascending by id.
    pub fn evaluate_all_at(&mut self, now_ms: i64) -> Vec<Alert> {
        let patients = self.store.all_patients();
        let mut fired = Vec::new();
        for patient_id in patients {
            fired.extend(self.evaluate_at(patient_id, now_ms));
        }
        tracing::debug!(fired = fired.len(), "Evaluation pass complete");
        fired
    }

    /// Every alert fired so far, in firing order.
    pub fn alerts(&self) -> &[Alert] {
        &self.log
    }

    pub fn alert_at(&self, index: usize) -> Option<&Alert> {
        self.log.get(index)
    }

    pub fn alert_count(&self) -> usize {
        self.log.len()
    }
}
