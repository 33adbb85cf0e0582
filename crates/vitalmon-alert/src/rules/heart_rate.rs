use crate::window::MovingWindow;
use crate::AlertRule;
use vitalmon_common::types::{Alert, Condition, PatientId, Record, RecordKind};

pub const ECG_WINDOW_SIZE: usize = 10;
pub const PEAK_THRESHOLD_MULTIPLIER: f64 = 1.5;

/// ECG peak detection against a moving average of the preceding samples.
pub struct HeartRateRule {
    pub id: String,
    pub name: String,
}

impl Default for HeartRateRule {
    fn default() -> Self {
        Self {
            id: "heart_rate".into(),
            name: "ECG peak".into(),
        }
    }
}

impl AlertRule for HeartRateRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, patient_id: PatientId, records: &[Record]) -> Option<Alert> {
        let mut window = MovingWindow::new(ECG_WINDOW_SIZE);

        for record in records.iter().filter(|r| r.kind == RecordKind::Ecg) {
            // NaN on the first sample: the comparison is false, so a cold
            // window never reports a peak.
            let average = window.average();
            if record.value.abs() > average * PEAK_THRESHOLD_MULTIPLIER {
                return Some(Alert::new(
                    patient_id,
                    Condition::SignificantEcgPeak,
                    record.timestamp,
                ));
            }
            window.push(record.value);
        }
        None
    }
}
