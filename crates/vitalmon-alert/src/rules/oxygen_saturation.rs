use crate::AlertRule;
use vitalmon_common::types::{Alert, Condition, PatientId, Record, RecordKind};

const LOW_SATURATION: f64 = 92.0;
const RAPID_DROP: f64 = 5.0;
const RAPID_DROP_INTERVAL_MS: i64 = 600_000;

/// Low oxygen saturation and rapid drops between consecutive readings.
pub struct OxygenSaturationRule {
    pub id: String,
    pub name: String,
}

impl Default for OxygenSaturationRule {
    fn default() -> Self {
        Self {
            id: "oxygen_saturation".into(),
            name: "Oxygen saturation".into(),
        }
    }
}

impl AlertRule for OxygenSaturationRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, patient_id: PatientId, records: &[Record]) -> Option<Alert> {
        // (value, timestamp) of the previous saturation reading
        let mut previous: Option<(f64, i64)> = None;

        for record in records.iter().filter(|r| r.kind == RecordKind::Saturation) {
            if record.value < LOW_SATURATION {
                return Some(Alert::new(
                    patient_id,
                    Condition::LowSaturation,
                    record.timestamp,
                ));
            }

            if let Some((prev_value, prev_ts)) = previous {
                // a gap that overflows i64 is never within the interval
                let within_interval = prev_ts != 0
                    && record
                        .timestamp
                        .checked_sub(prev_ts)
                        .is_some_and(|gap| gap <= RAPID_DROP_INTERVAL_MS);
                if within_interval && prev_value - record.value >= RAPID_DROP {
                    return Some(Alert::new(
                        patient_id,
                        Condition::RapidSaturationDrop,
                        record.timestamp,
                    ));
                }
            }

            previous = Some((record.value, record.timestamp));
        }
        None
    }
}
