use crate::utils::logging::*;
use chrono::{FixedOffset, Offset, Utc};
use common::observation::{Deduplicator, RetentionPolicy};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

#[cfg(not(test))]
const CONFIG_PATH: &str = "./management.toml";
#[cfg(test)]
const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../management.toml");

//seconds, one leap year
const MAX_RETENTION_WINDOW: u64 = 366 * 86_400;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub similarity_threshold: f64, //normalized units
    pub retention_policy: RetentionPolicy,
    pub tracked_labels: Vec<String>,
    pub timezone_offset: i32, //seconds east of UTC
    pub event_store_path: String, //path
}

impl Config {
    pub fn new() -> Self {
        //Without a configuration there is nothing sensible to run.
        match Self::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(entry) => {
                logging_console!(emergency_entry!("Config", SystemEntry::InvalidConfig, entry));
                panic!("{}", SystemEntry::InvalidConfig);
            }
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let toml_string = fs::read_to_string(path).map_err(|err| IOEntry::ReadFileError(path.display(), err).to_string())?;
        Self::parse(&toml_string)
    }

    pub fn parse(toml_string: &str) -> Result<Self, String> {
        let config = toml::from_str::<ConfigTable>(toml_string)
            .map_err(|err| IOEntry::TomlDeserializeError(err).to_string())?
            .config;
        if !Self::validate(&config) {
            return Err(SystemEntry::InvalidConfig.into());
        }
        Ok(config)
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_second(config.bind_retry_duration)
            && Config::validate_threshold(config.similarity_threshold)
            && Config::validate_retention_policy(config.retention_policy)
            && Config::validate_labels(&config.tracked_labels)
            && Config::validate_offset(config.timezone_offset)
            && !config.event_store_path.trim().is_empty()
    }

    /// Fields read once at start-up. Changing them at runtime would leave the
    /// event store, the listener or the recorded calendar out of step.
    pub fn restart_required(&self, other: &Config) -> bool {
        self.http_server_bind_port != other.http_server_bind_port
            || self.timezone_offset != other.timezone_offset
            || self.event_store_path != other.event_store_path
    }

    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(|| Utc.fix())
    }

    pub fn deduplicator(&self) -> Deduplicator {
        Deduplicator::new(self.similarity_threshold, self.retention_policy)
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_threshold(threshold: f64) -> bool {
        threshold.is_finite() && threshold > 0.0 && threshold <= 1.0
    }

    fn validate_retention_policy(policy: RetentionPolicy) -> bool {
        match policy {
            RetentionPolicy::LastCycles(cycles) => cycles > 0,
            RetentionPolicy::Within(seconds) => seconds > 0 && seconds <= MAX_RETENTION_WINDOW,
            _ => true,
        }
    }

    fn validate_labels(labels: &[String]) -> bool {
        !labels.is_empty() && labels.iter().all(|label| !label.trim().is_empty())
    }

    fn validate_offset(offset: i32) -> bool {
        offset.abs() < 86_400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[Config]
http_server_bind_port = 8000
bind_retry_duration = 10
similarity_threshold = 0.01
retention_policy = "Accumulate"
tracked_labels = ["car", "vehicle"]
timezone_offset = -14400
event_store_path = "./events.jsonl"
"#;

    #[test]
    fn sample_configuration_parses() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.retention_policy, RetentionPolicy::Accumulate);
        assert_eq!(config.timezone().local_minus_utc(), -14400);
        assert_eq!(config.deduplicator().threshold, 0.01);
    }

    #[test]
    fn sliding_window_policy_parses_from_inline_table() {
        let toml_string = SAMPLE.replace("\"Accumulate\"", "{ LastCycles = 10 }");
        let config = Config::parse(&toml_string).unwrap();
        assert_eq!(config.retention_policy, RetentionPolicy::LastCycles(10));
    }

    #[test]
    fn zero_threshold_is_invalid() {
        let toml_string = SAMPLE.replace("similarity_threshold = 0.01", "similarity_threshold = 0.0");
        assert!(Config::parse(&toml_string).is_err());
    }

    #[test]
    fn empty_window_is_invalid() {
        let toml_string = SAMPLE.replace("\"Accumulate\"", "{ Within = 0 }");
        assert!(Config::parse(&toml_string).is_err());
    }

    #[test]
    fn oversized_window_is_invalid() {
        let toml_string = SAMPLE.replace("\"Accumulate\"", "{ Within = 10000000000000000 }");
        assert!(Config::parse(&toml_string).is_err());
        let toml_string = SAMPLE.replace("\"Accumulate\"", "{ Within = 86400 }");
        assert_eq!(Config::parse(&toml_string).unwrap().retention_policy, RetentionPolicy::Within(86400));
    }

    #[test]
    fn start_up_fields_require_restart() {
        let config = Config::parse(SAMPLE).unwrap();
        let mut tuned = config.clone();
        tuned.similarity_threshold = 0.02;
        tuned.retention_policy = RetentionPolicy::LastCycles(3);
        assert!(!config.restart_required(&tuned));

        let mut moved = config.clone();
        moved.timezone_offset = 9 * 3600;
        assert!(config.restart_required(&moved));
        let mut moved = config.clone();
        moved.event_store_path = "./elsewhere.jsonl".to_string();
        assert!(config.restart_required(&moved));
        let mut moved = config.clone();
        moved.http_server_bind_port = 8001;
        assert!(config.restart_required(&moved));
    }

    #[test]
    fn missing_table_is_reported() {
        assert!(Config::parse("http_server_bind_port = 8000").is_err());
    }
}
