//! Sensor integration configuration.

use std::time::Duration;

use serde::Deserialize;

/// Prefix joined with the vendor device name to build display names.
pub const DEFAULT_NAME_PREFIX: &str = "neviweb130 sensor";

/// Default polling interval, in seconds.
pub const DEFAULT_SCAN_INTERVAL_SECS: u32 = 540;

/// Configuration for the Neviweb130 sensor integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Prefix of every sensor's display name.
    pub name_prefix: String,
    /// Interval between poll cycles, in seconds.
    pub scan_interval_secs: u32,
}

impl SensorConfig {
    /// Polling interval as a [`Duration`].
    #[must_use]
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.scan_interval_secs))
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = SensorConfig::default();
        assert_eq!(config.name_prefix, "neviweb130 sensor");
        assert_eq!(config.scan_interval_secs, 540);
        assert_eq!(config.scan_interval(), Duration::from_secs(540));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            name_prefix = "sedna"
            scan_interval_secs = 60
        "#;
        let config: SensorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name_prefix, "sedna");
        assert_eq!(config.scan_interval(), Duration::from_secs(60));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: SensorConfig = toml::from_str("scan_interval_secs = 120").unwrap();
        assert_eq!(config.name_prefix, "neviweb130 sensor");
        assert_eq!(config.scan_interval_secs, 120);
    }
}
