//! File-backed weather source and asset directory

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use airsign_core::traits::{AssetStore, FetchError, WeatherSource};
use airsign_protocol::WeatherReading;

/// Reading served when no weather file is configured
const CANNED_WEATHER: &str = r#"{
    "weather": [{"main": "Clouds", "icon": "04d"}],
    "main": {"temp": 12.4, "humidity": 71, "pressure": 1013},
    "wind": {"speed": 4.1, "deg": 250}
}"#;

/// Serves a saved current-weather response instead of calling the service
pub struct FileWeather {
    path: Option<PathBuf>,
}

impl FileWeather {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl WeatherSource for FileWeather {
    fn fetch(&mut self, url: &str) -> Result<WeatherReading, FetchError> {
        debug!("weather fetch {}", url);
        let Some(path) = &self.path else {
            return Ok(WeatherReading::from_json(CANNED_WEATHER.as_bytes())?);
        };
        let body = fs::read(path).map_err(|e| {
            warn!("cannot read {}: {}", path.display(), e);
            FetchError::Network
        })?;
        Ok(WeatherReading::from_json(&body)?)
    }
}

/// Asset lookup against a directory tree
///
/// With no root every asset is assumed present.
pub struct DirAssets {
    root: Option<PathBuf>,
}

impl DirAssets {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }
}

impl AssetStore for DirAssets {
    fn exists(&self, path: &str) -> bool {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')).is_file(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_reading_decodes() {
        let mut source = FileWeather::new(None);
        let reading = source.fetch("http://example.invalid").unwrap();
        assert_eq!(reading.condition.as_str(), "Clouds");
        assert_eq!(reading.wind_deg, 250.0);
    }

    #[test]
    fn test_missing_file_is_network_error() {
        let mut source = FileWeather::new(Some(PathBuf::from("/nonexistent/airsign/weather.json")));
        assert_eq!(source.fetch("x"), Err(FetchError::Network));
    }

    #[test]
    fn test_assets_without_root() {
        assert!(DirAssets::new(None).exists("/emoji/1f600.bmp"));
        assert!(!DirAssets::new(Some(PathBuf::from("/nonexistent"))).exists("/emoji/1f600.bmp"));
    }
}
