use alloy::primitives::Address;
use anyhow::{Context, Result};
use governor::ScannerConfig;
use serde::Deserialize;
use std::{env, fs, str::FromStr};
use tracing::{info, warn};
use utils::errors::{CONFIG_PARSE_FAILED, ETHEREUM_NODE_URL_NOT_SET, GOVERNOR_ADDRESS_NOT_SET, INVALID_RPC_URL};

pub const DEFAULT_CONFIG_PATH: &str = "govwatch.yaml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GovwatchConfig {
    pub rpc_url: Option<String>,
    pub governor: Option<Address>,
    pub votes_token: Option<Address>,
    pub scanner: ScannerConfig,
}

/// Fully resolved settings a command runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rpc_url: alloy::transports::http::reqwest::Url,
    pub governor: Address,
    pub votes_token: Option<Address>,
    pub scanner: ScannerConfig,
}

impl GovwatchConfig {
    /// Applies command line flags on top of file and environment values.
    pub fn resolve(
        mut self,
        rpc_url: Option<String>,
        governor: Option<Address>,
        votes_token: Option<Address>,
    ) -> Result<Settings> {
        if rpc_url.is_some() {
            self.rpc_url = rpc_url;
        }
        if governor.is_some() {
            self.governor = governor;
        }
        if votes_token.is_some() {
            self.votes_token = votes_token;
        }

        let rpc_url = self.rpc_url.context(ETHEREUM_NODE_URL_NOT_SET)?;
        Ok(Settings {
            rpc_url: rpc_url.parse().context(INVALID_RPC_URL)?,
            governor: self.governor.context(GOVERNOR_ADDRESS_NOT_SET)?,
            votes_token: self.votes_token,
            scanner: self.scanner,
        })
    }
}

pub fn load(path: Option<&str>) -> GovwatchConfig {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<GovwatchConfig>(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, path = %path, "{CONFIG_PARSE_FAILED}, using defaults");
                GovwatchConfig::default()
            }
        },
        Err(err) => {
            warn!(error = %err, path = %path, "Govwatch config not found, using defaults");
            GovwatchConfig::default()
        }
    };

    apply_env_overrides(&mut config);

    info!(
        governor = ?config.governor,
        votes_token = ?config.votes_token,
        max_chunk = config.scanner.max_chunk,
        "Govwatch config loaded"
    );

    config
}

fn apply_env_overrides(config: &mut GovwatchConfig) {
    if let Ok(value) = env::var("ETHEREUM_NODE_URL") {
        config.rpc_url = Some(value);
    }

    if let Ok(value) = env::var("GOVERNOR_ADDRESS") {
        match Address::from_str(&value) {
            Ok(address) => config.governor = Some(address),
            Err(err) => warn!(error = %err, "Failed to parse GOVERNOR_ADDRESS override"),
        }
    }

    if let Ok(value) = env::var("VOTES_TOKEN_ADDRESS") {
        match Address::from_str(&value) {
            Ok(address) => config.votes_token = Some(address),
            Err(err) => warn!(error = %err, "Failed to parse VOTES_TOKEN_ADDRESS override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serial_test::serial;
    use std::time::Duration;

    const GOVERNOR: Address = address!("0xf07DeD9dC292157749B6Fd268E37DF6EA38395B9");

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized.
        unsafe {
            env::remove_var("ETHEREUM_NODE_URL");
            env::remove_var("GOVERNOR_ADDRESS");
            env::remove_var("VOTES_TOKEN_ADDRESS");
        }
    }

    #[test]
    fn parses_yaml() {
        let config: GovwatchConfig = serde_yaml::from_str(
            r#"
rpc_url: http://localhost:8545
governor: "0xf07DeD9dC292157749B6Fd268E37DF6EA38395B9"
scanner:
  max_chunk: 10000
  retry_delay: 500
"#,
        )
        .unwrap();

        assert_eq!(config.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.governor, Some(GOVERNOR));
        assert_eq!(config.votes_token, None);
        assert_eq!(config.scanner.max_chunk, 10_000);
        assert_eq!(config.scanner.retry_delay, Duration::from_millis(500));
        assert_eq!(config.scanner.min_chunk, ScannerConfig::default().min_chunk);
    }

    #[test]
    #[serial]
    fn missing_file_falls_back_to_defaults() {
        clear_env();
        let config = load(Some("/nonexistent/govwatch.yaml"));
        assert_eq!(config, GovwatchConfig::default());
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        clear_env();
        // SAFETY: serialized with the other environment tests.
        unsafe {
            env::set_var("ETHEREUM_NODE_URL", "http://node:8545");
            env::set_var("GOVERNOR_ADDRESS", "0xf07DeD9dC292157749B6Fd268E37DF6EA38395B9");
            env::set_var("VOTES_TOKEN_ADDRESS", "not-an-address");
        }

        let mut config = GovwatchConfig {
            rpc_url: Some("http://file:8545".to_string()),
            ..Default::default()
        };
        apply_env_overrides(&mut config);
        clear_env();

        assert_eq!(config.rpc_url.as_deref(), Some("http://node:8545"));
        assert_eq!(config.governor, Some(GOVERNOR));
        assert_eq!(config.votes_token, None);
    }

    #[test]
    fn flags_take_precedence_and_missing_values_error() {
        let config = GovwatchConfig {
            rpc_url: Some("http://file:8545".to_string()),
            governor: Some(GOVERNOR),
            ..Default::default()
        };

        let settings = config
            .clone()
            .resolve(Some("http://flag:8545".to_string()), None, None)
            .unwrap();
        assert_eq!(settings.rpc_url.as_str(), "http://flag:8545/");
        assert_eq!(settings.governor, GOVERNOR);

        let err = GovwatchConfig::default().resolve(None, None, None).unwrap_err();
        assert_eq!(err.to_string(), ETHEREUM_NODE_URL_NOT_SET);

        let err = GovwatchConfig {
            governor: None,
            ..config
        }
        .resolve(None, None, None)
        .unwrap_err();
        assert_eq!(err.to_string(), GOVERNOR_ADDRESS_NOT_SET);
    }
}
