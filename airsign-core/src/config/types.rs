//! Configuration type definitions

use alloc::format;
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::input::{DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
use crate::weather::WEATHER_URL_BASE;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timeout or interval is zero
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    /// Debounce window beyond the supported range
    #[error("debounce window of {0} ms exceeds 30 ms")]
    DebounceTooLong(u32),
    /// Topic prefix is empty
    #[error("topic prefix must not be empty")]
    EmptyTopicPrefix,
    /// Message column width is zero
    #[error("message column width must be greater than zero")]
    ZeroColumnWidth,
}

/// Weather service settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeatherConfig {
    /// City query, e.g. "London,GB"
    pub location: String,
    /// Service API key
    pub token: String,
    /// Snapshot lifetime in seconds
    pub ttl_s: u32,
    /// Delay before retrying a failed fetch, seconds
    pub retry_s: u32,
    /// Time each page stays up, seconds
    pub page_timeout_s: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: String::new(),
            token: String::new(),
            ttl_s: 600,
            retry_s: 30,
            page_timeout_s: 5,
        }
    }
}

/// Message board settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MessagesConfig {
    /// Time each message stays up, seconds
    pub duration_s: u32,
    /// Width text lines are right-justified to
    pub column_width: u8,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            duration_s: 5,
            column_width: 10,
        }
    }
}

/// Command channel settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransportConfig {
    /// Topics are `<topic_prefix>/<suffix>`
    pub topic_prefix: String,
    /// Longest a single poll may block
    pub poll_timeout_ms: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            topic_prefix: String::from(airsign_protocol::DEFAULT_PREFIX),
            poll_timeout_ms: 10,
        }
    }
}

/// Button settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Confirm window; 0 disables debouncing
    pub debounce_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Complete sign configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignConfig {
    pub weather: WeatherConfig,
    pub messages: MessagesConfig,
    pub transport: TransportConfig,
    pub input: InputConfig,
    /// Where fatal faults are appended, if anywhere
    pub fault_log: Option<String>,
}

impl SignConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("weather.ttl_s", self.weather.ttl_s),
            ("weather.retry_s", self.weather.retry_s),
            ("weather.page_timeout_s", self.weather.page_timeout_s),
            ("messages.duration_s", self.messages.duration_s),
            ("transport.poll_timeout_ms", self.transport.poll_timeout_ms),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroTimeout(*name));
        }
        if self.input.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong(self.input.debounce_ms));
        }
        if self.transport.topic_prefix.is_empty() {
            return Err(ConfigError::EmptyTopicPrefix);
        }
        if self.messages.column_width == 0 {
            return Err(ConfigError::ZeroColumnWidth);
        }
        Ok(())
    }

    /// Current-weather request URL for the configured location
    pub fn weather_url(&self) -> String {
        format!(
            "{}?q={}&units=metric&appid={}",
            WEATHER_URL_BASE, self.weather.location, self.weather.token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SignConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.weather.ttl_s, 600);
        assert_eq!(config.weather.retry_s, 30);
        assert_eq!(config.transport.topic_prefix, "display");
        assert_eq!(config.input.debounce_ms, 20);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = SignConfig::default();
        config.weather.page_timeout_s = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("weather.page_timeout_s"))
        );
    }

    #[test]
    fn test_long_debounce_rejected() {
        let mut config = SignConfig::default();
        config.input.debounce_ms = 30;
        assert_eq!(config.validate(), Ok(()));
        config.input.debounce_ms = 31;
        assert_eq!(config.validate(), Err(ConfigError::DebounceTooLong(31)));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let mut config = SignConfig::default();
        config.transport.topic_prefix.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyTopicPrefix));
    }

    #[test]
    fn test_weather_url() {
        let mut config = SignConfig::default();
        config.weather.location = "London,GB".into();
        config.weather.token = "abc123".into();
        assert_eq!(
            config.weather_url(),
            "http://api.openweathermap.org/data/2.5/weather?q=London,GB&units=metric&appid=abc123"
        );
    }
}
