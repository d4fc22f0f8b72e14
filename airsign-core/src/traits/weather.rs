//! Weather service trait

use airsign_protocol::{PayloadError, WeatherReading};

/// Errors that can occur fetching weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Request could not be sent or the connection dropped
    #[error("network error")]
    Network,
    /// No response in time
    #[error("request timed out")]
    Timeout,
    /// Service answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),
    /// Response body was not a usable weather document
    #[error("bad weather document: {0}")]
    Decode(#[from] PayloadError),
}

/// Trait for a current-weather provider
pub trait WeatherSource {
    /// Fetch and decode the document at `url`
    ///
    /// Blocks for as long as the implementation allows.
    fn fetch(&mut self, url: &str) -> Result<WeatherReading, FetchError>;
}
