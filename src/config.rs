//! Startup configuration, read once from the environment.
//!
//! A `.env` file in the working directory is loaded first (see `run`), so
//! the same variables can live there instead of the shell.

use crate::llm::gemini::DEFAULT_MODEL;
use crate::trigger::parse_key_name;
use device_query::Keycode;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TOGGLE_KEY: &str = "CapsLock";
const DEFAULT_CAPTURE_KEY: &str = "RShift";
const DEFAULT_POLL_MS: u64 = 100;
const DEFAULT_SEND_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub google_api_key: String,
    pub gemini_model: String,
    pub screenshot_folder: PathBuf,
    pub toggle_key: Keycode,
    pub capture_key: Keycode,
    /// Trigger sampling cadence.
    pub poll_interval: Duration,
    /// Pause after each delivered image and between text parts.
    pub send_delay: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: unknown key name {value:?}")]
    UnknownKey { var: &'static str, value: String },
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any name → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token = get("TELEGRAM_TOKEN").unwrap_or_default();
        let telegram_chat_id = get("TELEGRAM_CHAT_ID").unwrap_or_default();
        let google_api_key = get("GOOGLE_API_KEY").unwrap_or_default();

        for (var, value) in [
            ("TELEGRAM_TOKEN", &telegram_token),
            ("TELEGRAM_CHAT_ID", &telegram_chat_id),
            ("GOOGLE_API_KEY", &google_api_key),
        ] {
            if value.is_empty() {
                log::warn!("[CONFIG] {} is not set; requests using it will fail", var);
            }
        }

        let screenshot_folder = get("SCREENSHOT_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(default_screenshot_folder);

        let key = |var: &'static str, default: &str| -> Result<Keycode, ConfigError> {
            let value = get(var).unwrap_or_else(|| default.to_string());
            parse_key_name(&value).ok_or(ConfigError::UnknownKey { var, value })
        };
        let millis = |var: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(var) {
                None => Ok(Duration::from_millis(default)),
                Some(value) => value
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
            }
        };

        Ok(Self {
            telegram_token,
            telegram_chat_id,
            google_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            screenshot_folder,
            toggle_key: key("AGENT_TOGGLE_KEY", DEFAULT_TOGGLE_KEY)?,
            capture_key: key("AGENT_CAPTURE_KEY", DEFAULT_CAPTURE_KEY)?,
            poll_interval: millis("AGENT_POLL_MS", DEFAULT_POLL_MS)?,
            send_delay: millis("AGENT_SEND_DELAY_MS", DEFAULT_SEND_DELAY_MS)?,
        })
    }
}

/// `<Pictures>/screenshot-agent`, or `./screenshots` when the platform has
/// no pictures directory.
fn default_screenshot_folder() -> PathBuf {
    dirs::picture_dir()
        .map(|p| p.join("screenshot-agent"))
        .unwrap_or_else(|| PathBuf::from("screenshots"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AgentConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AgentConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.toggle_key, Keycode::CapsLock);
        assert_eq!(config.capture_key, Keycode::RShift);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.send_delay, Duration::from_secs(1));
        assert!(config.telegram_token.is_empty());
        assert!(
            config.screenshot_folder.ends_with("screenshot-agent")
                || config.screenshot_folder.ends_with("screenshots")
        );
    }

    #[test]
    fn reads_credentials_and_overrides() {
        let config = config_from(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", " 42 "),
            ("GOOGLE_API_KEY", "AIza-test"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("SCREENSHOT_FOLDER", "/tmp/shots"),
            ("AGENT_TOGGLE_KEY", "f9"),
            ("AGENT_POLL_MS", "50"),
        ])
        .unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.google_api_key, "AIza-test");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.screenshot_folder, PathBuf::from("/tmp/shots"));
        assert_eq!(config.toggle_key, Keycode::F9);
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let config = config_from(&[("GEMINI_MODEL", "   ")]).unwrap();
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = config_from(&[("AGENT_SEND_DELAY_MS", "1s")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { var: "AGENT_SEND_DELAY_MS", .. }
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = config_from(&[("AGENT_CAPTURE_KEY", "hyper")]).unwrap_err();
        assert_eq!(err.to_string(), "AGENT_CAPTURE_KEY: unknown key name \"hyper\"");
    }
}
