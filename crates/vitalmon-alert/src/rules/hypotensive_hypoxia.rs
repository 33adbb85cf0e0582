use crate::AlertRule;
use vitalmon_common::types::{Alert, Condition, PatientId, Record, RecordKind};

const LOW_SATURATION: f64 = 92.0;
const LOW_SYSTOLIC: f64 = 90.0;

/// Fires when the latest systolic reading is low and the latest saturation
/// reading is low at the same time.
pub struct HypotensiveHypoxiaRule {
    pub id: String,
    pub name: String,
}

impl Default for HypotensiveHypoxiaRule {
    fn default() -> Self {
        Self {
            id: "hypotensive_hypoxia".into(),
            name: "Hypotensive hypoxemia".into(),
        }
    }
}

impl AlertRule for HypotensiveHypoxiaRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, patient_id: PatientId, records: &[Record]) -> Option<Alert> {
        let mut low_systolic = false;
        let mut low_saturation = false;

        for record in records {
            match record.kind {
                RecordKind::Saturation => low_saturation = record.value < LOW_SATURATION,
                RecordKind::SystolicPressure => low_systolic = record.value < LOW_SYSTOLIC,
                _ => {}
            }
            if low_systolic && low_saturation {
                return Some(Alert::new(
                    patient_id,
                    Condition::HypotensiveHypoxemia,
                    record.timestamp,
                ));
            }
        }
        None
    }
}
