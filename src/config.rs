//! Configuration for polling defaults and error classification.
//!
//! Loaded from YAML; every field has a default so a partial (or missing)
//! file still yields a working setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ErrorKind, PollrError, Result};
use crate::policy::ErrorPolicy;
use crate::query::PollOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub polling: PollingConfig,
    pub policy: PolicyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polling: PollingConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub timeout_ms: u64,
    pub retry_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            retry_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub retryable: Vec<ErrorKind>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            retryable: vec![ErrorKind::NotFound, ErrorKind::Stale, ErrorKind::Unavailable],
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values.
    ///
    /// A zero timeout is legal (single-attempt execution); a zero retry
    /// interval is not, since the loop must never busy-spin.
    pub fn validate(&self) -> Result<()> {
        if self.polling.retry_interval_ms == 0 {
            return Err(PollrError::Config(
                "retry_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured timeout/interval as executor options.
    pub fn options(&self) -> PollOptions {
        PollOptions::new(
            Duration::from_millis(self.polling.timeout_ms),
            Duration::from_millis(self.polling.retry_interval_ms),
        )
    }

    /// The configured classification policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::new(self.policy.retryable.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.polling.timeout_ms, 1000);
        assert_eq!(config.polling.retry_interval_ms, 50);
        assert_eq!(config.policy.retryable.len(), 3);
    }

    #[test]
    fn test_config_options_conversion() {
        let config = Config::default();
        let options = config.options();
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert_eq!(options.retry_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_config_error_policy_conversion() {
        let config = Config::default();
        let policy = config.error_policy();
        assert!(policy.is_retryable(ErrorKind::NotFound));
        assert!(!policy.is_retryable(ErrorKind::Invalid));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("polling:\n  timeout_ms: 250\n").unwrap();
        assert_eq!(config.polling.timeout_ms, 250);
        assert_eq!(config.polling.retry_interval_ms, 50);
        assert_eq!(config.policy.retryable.len(), 3);
    }

    #[test]
    fn test_policy_from_yaml() {
        let yaml = "policy:\n  retryable:\n    - not_found\n    - internal\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let policy = config.error_policy();
        assert!(policy.is_retryable(ErrorKind::NotFound));
        assert!(policy.is_retryable(ErrorKind::Internal));
        assert!(!policy.is_retryable(ErrorKind::Stale));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.polling.retry_interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry_interval_ms"));
    }

    #[test]
    fn test_validate_allows_zero_timeout() {
        let mut config = Config::default();
        config.polling.timeout_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pollr.yaml");
        std::fs::write(
            &path,
            "polling:\n  timeout_ms: 2000\n  retry_interval_ms: 100\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.polling.timeout_ms, 2000);
        assert_eq!(config.polling.retry_interval_ms, 100);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pollr.yaml")).unwrap_err();
        assert!(matches!(err, PollrError::Io(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pollr.yaml");
        std::fs::write(&path, "polling:\n  retry_interval_ms: 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, PollrError::Config(_)));
    }
}
