use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Emit per-request `LOADTEST` target logs
    #[serde(default)]
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Cap on concurrently served requests. Absent means unbounded.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_in_flight: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "loadtest.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            enable_tracing: false,
            gateway: GatewayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.max_in_flight == Some(0) {
            return Err(ConfigError::Invalid(
                "gateway.max_in_flight must be at least 1 (omit it for no limit)".to_string(),
            ));
        }
        match self.rotation.as_str() {
            "never" | "hourly" | "daily" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "unknown log rotation '{}' (expected never, hourly or daily)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_YAML: &str = r#"
log_level: debug
log_dir: ./logs
log_file: loadtest.log
use_json: false
rotation: daily
gateway:
  host: 127.0.0.1
  port: 9090
"#;

    #[test]
    fn test_parse_minimal_yaml() {
        let cfg = AppConfig::from_yaml_str(DEV_YAML).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.rotation, "daily");
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert_eq!(cfg.gateway.port, 9090);
        // Optional fields fall back to defaults
        assert!(!cfg.enable_tracing);
        assert_eq!(cfg.gateway.max_in_flight, None);
    }

    #[test]
    fn test_parse_max_in_flight() {
        let yaml = DEV_YAML.replace("port: 9090", "port: 9090\n  max_in_flight: 4");
        let cfg = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(cfg.gateway.max_in_flight, Some(4));
    }

    #[test]
    fn test_zero_max_in_flight_rejected() {
        let yaml = DEV_YAML.replace("port: 9090", "port: 9090\n  max_in_flight: 0");
        let err = AppConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_rotation_rejected() {
        let yaml = DEV_YAML.replace("rotation: daily", "rotation: weekly");
        let err = AppConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_missing_gateway_is_parse_error() {
        let err = AppConfig::from_yaml_str("log_level: info\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::load("does-not-exist").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => assert_eq!(path, "config/does-not-exist.yaml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shipped_configs_parse() {
        for env in ["dev", "prod"] {
            let path = format!("{}/config/{}.yaml", env!("CARGO_MANIFEST_DIR"), env);
            let content = fs::read_to_string(&path).unwrap();
            AppConfig::from_yaml_str(&content).unwrap();
        }
    }
}
