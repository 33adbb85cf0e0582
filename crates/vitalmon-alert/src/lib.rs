//! Clinical rule engine evaluating recent patient measurements.
//!
//! The [`engine::AlertEngine`] queries a bounded look-back window per patient
//! from the [`vitalmon_storage::RecordStore`] and hands it to every configured
//! [`AlertRule`]. Rules are stateless between calls: each evaluation re-derives
//! trend counters and moving averages from the freshly queried window.
//! Built-in rules cover blood pressure, oxygen saturation, ECG peaks and
//! hypotensive hypoxemia.

pub mod engine;
pub mod rules;
pub mod window;


use vitalmon_common::types::{Alert, PatientId, Record};

/// A clinical rule scanning an ordered record window and producing at most
/// one [`Alert`] per call.
///
/// Records are visited in the order the store returned them, which is append
/// order and not necessarily timestamp order.
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule instance (e.g., `"blood_pressure"`).
    fn id(&self) -> &str;

    /// Human-readable name for this rule.
    fn name(&self) -> &str;

    /// Scans `records` and returns the first alert condition met, or `None`.
    fn evaluate(&self, patient_id: PatientId, records: &[Record]) -> Option<Alert>;
}
