use crate::error::{IngestError, Result};
use crate::store::RecordStore;
use vitalmon_common::types::{PatientId, Record, RecordKind};

const FIELD_COUNT: usize = 4;

/// A validated ingestion tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub patient_id: PatientId,
    pub timestamp: i64,
    pub kind: RecordKind,
    pub value: f64,
}

impl Measurement {
    pub fn into_record(self) -> Record {
        Record::new(self.patient_id, self.value, self.kind, self.timestamp)
    }
}

/// Parses one ingestion line.
///
/// Two layouts are accepted, both ordered `patient, timestamp, label, value`:
/// the bare wire form `1,1627849261000,SystolicPressure,72.5` and the
/// labelled file form `Patient ID: 1, Timestamp: 1627849261000, Label: Saturation, Data: 97.0%`.
///
/// # Examples
///
/// ```
/// use vitalmon_common::types::RecordKind;
/// use vitalmon_storage::ingest::parse_line;
///
/// let m = parse_line("1,1627849261000,SystolicPressure,72.5").unwrap();
/// assert_eq!(m.kind, RecordKind::SystolicPressure);
/// assert_eq!(m.value, 72.5);
/// assert!(parse_line("corrupted,data").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Measurement> {
    let fields: Vec<&str> = line.split(',').map(|f| strip_label(f.trim())).collect();
    if fields.len() != FIELD_COUNT {
        return Err(IngestError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let patient_id: PatientId = fields[0]
        .parse()
        .map_err(|_| IngestError::InvalidNumber {
            field: "patient id",
            raw: fields[0].to_string(),
        })?;
    let timestamp: i64 = fields[1]
        .parse()
        .map_err(|_| IngestError::InvalidNumber {
            field: "timestamp",
            raw: fields[1].to_string(),
        })?;
    let kind: RecordKind = fields[2].parse().map_err(IngestError::UnknownKind)?;

    // Saturation samples carry a percent suffix in the simulator output.
    let raw_value = fields[3].strip_suffix('%').unwrap_or(fields[3]).trim_end();
    let value: f64 = raw_value.parse().map_err(|_| IngestError::InvalidNumber {
        field: "value",
        raw: fields[3].to_string(),
    })?;
    if !value.is_finite() {
        return Err(IngestError::NonFinite(fields[3].to_string()));
    }

    Ok(Measurement {
        patient_id,
        timestamp,
        kind,
        value,
    })
}

/// Parses `line` and appends it to `store`. Nothing is written on error.
pub fn ingest_line(store: &RecordStore, line: &str) -> Result<Record> {
    let record = parse_line(line)?.into_record();
    store.append_record(record);
    Ok(record)
}

/// Drops a leading `Name: ` prefix from a labelled field.
fn strip_label(field: &str) -> &str {
    match field.split_once(':') {
        Some((name, rest)) if is_field_name(name) => rest.trim(),
        _ => field,
    }
}

fn is_field_name(name: &str) -> bool {
    matches!(
        name.trim(),
        "Patient ID" | "Timestamp" | "Label" | "Data" | "Value"
    )
}
