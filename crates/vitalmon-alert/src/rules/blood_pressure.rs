use crate::AlertRule;
use vitalmon_common::types::{Alert, Condition, PatientId, Record, RecordKind};

const SYSTOLIC_HIGH: f64 = 180.0;
const SYSTOLIC_LOW: f64 = 90.0;
const DIASTOLIC_HIGH: f64 = 120.0;
const DIASTOLIC_LOW: f64 = 60.0;

/// Minimum change between consecutive readings that counts as a step.
const TREND_STEP: f64 = 10.0;
/// Consecutive same-direction steps that make a trend.
const TREND_RUN: i32 = 3;

/// Critical systolic/diastolic thresholds plus three-step trend detection.
pub struct BloodPressureRule {
    pub id: String,
    pub name: String,
}

impl Default for BloodPressureRule {
    fn default() -> Self {
        Self {
            id: "blood_pressure".into(),
            name: "Blood pressure".into(),
        }
    }
}

/// Run-length tracker for one pressure signal.
#[derive(Default)]
struct TrendTracker {
    previous: Option<f64>,
    run: i32,
}

impl TrendTracker {
    /// Feeds the next reading; returns `true` when a run of [`TREND_RUN`]
    /// steps completes (the run then restarts from zero).
    fn observe(&mut self, value: f64) -> bool {
        let completed = match self.previous {
            Some(previous) => {
                let increment = step(previous, value);
                if increment == 0 {
                    self.run = 0;
                    false
                } else {
                    if self.run.signum() == -increment {
                        self.run = 0;
                    }
                    self.run += increment;
                    if self.run.abs() == TREND_RUN {
                        self.run = 0;
                        true
                    } else {
                        false
                    }
                }
            }
            None => {
                self.run = 0;
                false
            }
        };
        self.previous = Some(value);
        completed
    }
}

fn step(previous: f64, current: f64) -> i32 {
    if current > previous + TREND_STEP {
        1
    } else if current < previous - TREND_STEP {
        -1
    } else {
        0
    }
}

fn outside(value: f64, low: f64, high: f64) -> bool {
    value > high || value < low
}

impl AlertRule for BloodPressureRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, patient_id: PatientId, records: &[Record]) -> Option<Alert> {
        let mut systolic = TrendTracker::default();
        let mut diastolic = TrendTracker::default();

        for record in records {
            let (tracker, low, high, critical, trend) = match record.kind {
                RecordKind::SystolicPressure => (
                    &mut systolic,
                    SYSTOLIC_LOW,
                    SYSTOLIC_HIGH,
                    Condition::CriticalSystolicPressure,
                    Condition::SystolicPressureTrend,
                ),
                RecordKind::DiastolicPressure => (
                    &mut diastolic,
                    DIASTOLIC_LOW,
                    DIASTOLIC_HIGH,
                    Condition::CriticalDiastolicPressure,
                    Condition::DiastolicPressureTrend,
                ),
                _ => continue,
            };

            if outside(record.value, low, high) {
                return Some(Alert::new(patient_id, critical, record.timestamp));
            }
            if tracker.observe(record.value) {
                return Some(Alert::new(patient_id, trend, record.timestamp));
            }
        }
        None
    }
}
