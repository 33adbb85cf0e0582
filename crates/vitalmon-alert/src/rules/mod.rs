pub mod blood_pressure;
pub mod heart_rate;
pub mod hypotensive_hypoxia;
pub mod oxygen_saturation;

use crate::AlertRule;
use blood_pressure::BloodPressureRule;
use heart_rate::HeartRateRule;
use hypotensive_hypoxia::HypotensiveHypoxiaRule;
use oxygen_saturation::OxygenSaturationRule;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("Rules: unknown rule type '{0}'")]
    UnknownRule(String),
}

/// The built-in rule types, addressable by name from configuration.
///
/// # Examples
///
/// ```
/// use vitalmon_alert::rules::RuleKind;
/// use vitalmon_alert::AlertRule;
///
/// let kind: RuleKind = "heart_rate".parse().unwrap();
/// assert_eq!(kind, RuleKind::HeartRate);
/// assert_eq!(kind.build().id(), "heart_rate");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    BloodPressure,
    OxygenSaturation,
    HeartRate,
    HypotensiveHypoxia,
}

impl RuleKind {
    pub fn all() -> [RuleKind; 4] {
        [
            RuleKind::BloodPressure,
            RuleKind::OxygenSaturation,
            RuleKind::HeartRate,
            RuleKind::HypotensiveHypoxia,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::BloodPressure => "blood_pressure",
            RuleKind::OxygenSaturation => "oxygen_saturation",
            RuleKind::HeartRate => "heart_rate",
            RuleKind::HypotensiveHypoxia => "hypotensive_hypoxia",
        }
    }

    pub fn build(&self) -> Box<dyn AlertRule> {
        match self {
            RuleKind::BloodPressure => Box::new(BloodPressureRule::default()),
            RuleKind::OxygenSaturation => Box::new(OxygenSaturationRule::default()),
            RuleKind::HeartRate => Box::new(HeartRateRule::default()),
            RuleKind::HypotensiveHypoxia => Box::new(HypotensiveHypoxiaRule::default()),
        }
    }
}

impl FromStr for RuleKind {
    type Err = RuleConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood_pressure" => Ok(Self::BloodPressure),
            "oxygen_saturation" => Ok(Self::OxygenSaturation),
            "heart_rate" => Ok(Self::HeartRate),
            "hypotensive_hypoxia" => Ok(Self::HypotensiveHypoxia),
            _ => Err(RuleConfigError::UnknownRule(s.to_string())),
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds boxed rules from configured names, in the order given.
pub fn build_rules<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn AlertRule>>, RuleConfigError> {
    names
        .iter()
        .map(|name| name.as_ref().parse::<RuleKind>().map(|kind| kind.build()))
        .collect()
}
