use serde::{Deserialize, Serialize};

/// Patient identity. Opaque to the store: any value, negative included, is accepted.
pub type PatientId = i32;

/// The physiological signal a [`Record`] carries.
///
/// # Examples
///
/// ```
/// use vitalmon_common::types::RecordKind;
///
/// let kind: RecordKind = "Saturation".parse().unwrap();
/// assert_eq!(kind, RecordKind::Saturation);
/// assert_eq!(RecordKind::Ecg.to_string(), "ECG");
/// assert!("HeartRate".parse::<RecordKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    SystolicPressure,
    DiastolicPressure,
    Saturation,
    #[serde(rename = "ECG")]
    Ecg,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::SystolicPressure => "SystolicPressure",
            RecordKind::DiastolicPressure => "DiastolicPressure",
            RecordKind::Saturation => "Saturation",
            RecordKind::Ecg => "ECG",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SystolicPressure" => Ok(RecordKind::SystolicPressure),
            "DiastolicPressure" => Ok(RecordKind::DiastolicPressure),
            "Saturation" => Ok(RecordKind::Saturation),
            "ECG" => Ok(RecordKind::Ecg),
            _ => Err(format!("unknown record kind: {s}")),
        }
    }
}

/// One time-stamped measurement. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub patient_id: PatientId,
    pub value: f64,
    pub kind: RecordKind,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl Record {
    pub fn new(patient_id: PatientId, value: f64, kind: RecordKind, timestamp: i64) -> Self {
        Self {
            patient_id,
            value,
            kind,
            timestamp,
        }
    }
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use vitalmon_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert_eq!(sev.to_string(), "warning");
/// assert!(Severity::Critical > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// A triggered clinical condition.
///
/// High and low critical pressure readings share one condition each; the
/// direction is not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    CriticalSystolicPressure,
    CriticalDiastolicPressure,
    SystolicPressureTrend,
    DiastolicPressureTrend,
    LowSaturation,
    #[serde(rename = "rapidSaturationDrop")]
    RapidSaturationDrop,
    SignificantEcgPeak,
    HypotensiveHypoxemia,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::CriticalSystolicPressure => "CriticalSystolicPressure",
            Condition::CriticalDiastolicPressure => "CriticalDiastolicPressure",
            Condition::SystolicPressureTrend => "SystolicPressureTrend",
            Condition::DiastolicPressureTrend => "DiastolicPressureTrend",
            Condition::LowSaturation => "LowSaturation",
            Condition::RapidSaturationDrop => "rapidSaturationDrop",
            Condition::SignificantEcgPeak => "SignificantEcgPeak",
            Condition::HypotensiveHypoxemia => "HypotensiveHypoxemia",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Condition::CriticalSystolicPressure
            | Condition::CriticalDiastolicPressure
            | Condition::LowSaturation
            | Condition::HypotensiveHypoxemia => Severity::Critical,
            Condition::SystolicPressureTrend
            | Condition::DiastolicPressureTrend
            | Condition::RapidSaturationDrop
            | Condition::SignificantEcgPeak => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable alert value, appended to the engine's log in the order it fired.
///
/// # Examples
///
/// ```
/// use vitalmon_common::types::{Alert, Condition};
///
/// let alert = Alert::new(7, Condition::LowSaturation, 1_700_000_000_000);
/// assert_eq!(alert.patient_id, "7");
/// assert_eq!(alert.condition_name(), "LowSaturation");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub patient_id: String,
    pub condition: Condition,
    /// Timestamp of the record that triggered the alert, epoch milliseconds
    pub timestamp: i64,
}

impl Alert {
    pub fn new(patient_id: PatientId, condition: Condition, timestamp: i64) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            condition,
            timestamp,
        }
    }

    pub fn condition_name(&self) -> &'static str {
        self.condition.as_str()
    }

    pub fn severity(&self) -> Severity {
        self.condition.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_round_trips_through_labels() {
        for kind in [
            RecordKind::SystolicPressure,
            RecordKind::DiastolicPressure,
            RecordKind::Saturation,
            RecordKind::Ecg,
        ] {
            assert_eq!(kind.to_string().parse::<RecordKind>(), Ok(kind));
        }
    }

    #[test]
    fn record_kind_rejects_unknown_label() {
        assert!("Alert".parse::<RecordKind>().is_err());
        assert!("ecg".parse::<RecordKind>().is_err());
    }

    #[test]
    fn alert_serializes_condition_name() {
        let alert = Alert::new(1, Condition::RapidSaturationDrop, 42);
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["patient_id"], "1");
        assert_eq!(json["condition"], "rapidSaturationDrop");
        assert_eq!(json["timestamp"], 42);
    }

    #[test]
    fn record_kind_serializes_ecg_label() {
        let record = Record::new(3, 0.5, RecordKind::Ecg, 10);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"ECG\""));
    }

    #[test]
    fn condition_severity_mapping() {
        assert_eq!(
            Condition::CriticalSystolicPressure.severity(),
            Severity::Critical
        );
        assert_eq!(Condition::HypotensiveHypoxemia.severity(), Severity::Critical);
        assert_eq!(Condition::SystolicPressureTrend.severity(), Severity::Warning);
        assert_eq!(Condition::SignificantEcgPeak.severity(), Severity::Warning);
    }

    #[test]
    fn negative_patient_id_renders_in_alert() {
        let alert = Alert::new(-4, Condition::LowSaturation, 0);
        assert_eq!(alert.patient_id, "-4");
    }
}
