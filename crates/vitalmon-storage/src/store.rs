use parking_lot::RwLock;
use std::collections::HashMap;
use vitalmon_common::types::{PatientId, Record, RecordKind};

/// Ordered, append-only measurement history of one patient.
#[derive(Debug, Clone)]
pub struct Patient {
    id: PatientId,
    records: Vec<Record>,
}

impl Patient {
    pub fn new(id: PatientId) -> Self {
        Self {
            id,
            records: Vec::new(),
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn add_record(&mut self, value: f64, kind: RecordKind, timestamp: i64) {
        self.records
            .push(Record::new(self.id, value, kind, timestamp));
    }

    /// Full history in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records with `start <= timestamp <= end`, in insertion order.
    pub fn records_in_range(&self, start: i64, end: i64) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory measurement store keyed by patient.
///
/// Appends hold the write guard across find-or-create-then-push, so two
/// writers can never create duplicate patients and a reader never sees a
/// half-appended record. Queries share the read guard and return copies.
#[derive(Debug, Default)]
pub struct RecordStore {
    patients: RwLock<HashMap<PatientId, Patient>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, patient_id: PatientId, value: f64, kind: RecordKind, timestamp: i64) {
        let mut patients = self.patients.write();
        patients
            .entry(patient_id)
            .or_insert_with(|| {
                tracing::debug!(patient_id, "Registered new patient");
                Patient::new(patient_id)
            })
            .add_record(value, kind, timestamp);
    }

    pub fn append_record(&self, record: Record) {
        self.append(record.patient_id, record.value, record.kind, record.timestamp);
    }

    /// Returns the patient's records within `[start, end]` in append order.
    /// Unknown patients and empty ranges yield an empty vector.
    pub fn query(&self, patient_id: PatientId, start: i64, end: i64) -> Vec<Record> {
        if start > end {
            return Vec::new();
        }
        self.patients
            .read()
            .get(&patient_id)
            .map(|p| p.records_in_range(start, end))
            .unwrap_or_default()
    }

    /// Snapshot of the patient identities known at call time, ascending.
    pub fn all_patients(&self) -> Vec<PatientId> {
        let mut ids: Vec<PatientId> = self.patients.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn patient_count(&self) -> usize {
        self.patients.read().len()
    }

    pub fn record_count(&self, patient_id: PatientId) -> usize {
        self.patients
            .read()
            .get(&patient_id)
            .map_or(0, Patient::len)
    }
}
