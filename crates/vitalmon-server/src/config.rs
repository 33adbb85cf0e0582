use serde::{Deserialize, Serialize};
use vitalmon_alert::rules::RuleKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Seconds between two evaluation passes over every known patient.
    #[serde(default = "default_evaluation_interval_secs")]
    pub evaluation_interval_secs: u64,
    /// Length of the look-back window handed to the rules.
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: u64,

    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Rule type names, evaluated in this order.
    #[serde(default = "default_rules")]
    pub rules: Vec<String>,
    /// Re-read `rules` from the config file every N seconds; 0 disables it.
    #[serde(default)]
    pub rules_reload_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            rules_reload_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory of `*.txt` measurement files loaded once at startup.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: default_evaluation_interval_secs(),
            lookback_secs: default_lookback_secs(),
            alert: AlertConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

fn default_evaluation_interval_secs() -> u64 {
    20
}

fn default_lookback_secs() -> u64 {
    1200
}

fn default_rules() -> Vec<String> {
    RuleKind::all()
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.evaluation_interval_secs == 0 {
            anyhow::bail!("evaluation_interval_secs must be greater than 0");
        }
        Ok(config)
    }

    pub fn lookback_ms(&self) -> i64 {
        i64::try_from(self.lookback_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000)
    }
}
