//! Current-weather documents
//!
//! Decodes the subset of the OpenWeatherMap "current weather" response the
//! sign shows. Units are metric: °C, hPa, m/s.

use alloc::string::String as AllocString;
use alloc::vec::Vec as AllocVec;
use heapless::String;
use serde::Deserialize;

use crate::error::PayloadError;
use crate::message::bounded;

/// Maximum bytes of the condition text (`weather[0].main`)
pub const CONDITION_LEN: usize = 24;

/// Maximum bytes of the icon id (`weather[0].icon`)
pub const ICON_LEN: usize = 8;

// ── OWM JSON structures ─────────────────────────────────────────────

#[derive(Deserialize)]
struct OwmRoot {
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
    #[serde(default)]
    weather: AllocVec<OwmWeather>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: Option<f32>,
    humidity: Option<f32>,
    pressure: Option<f32>,
}

#[derive(Deserialize)]
struct OwmWind {
    speed: Option<f32>,
    deg: Option<f32>,
}

#[derive(Deserialize)]
struct OwmWeather {
    main: Option<AllocString>,
    icon: Option<AllocString>,
}

/// One decoded weather reading
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// Pressure in hPa
    pub pressure: f32,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// Wind direction in degrees; 0 when the service omits it
    pub wind_deg: f32,
    /// Short condition text, e.g. "Clouds"
    pub condition: String<CONDITION_LEN>,
    /// Icon id, e.g. "04d"
    pub icon: String<ICON_LEN>,
}

impl WeatherReading {
    /// Decode a current-weather response body
    pub fn from_json(body: &[u8]) -> Result<Self, PayloadError> {
        let root: OwmRoot = serde_json::from_slice(body).map_err(|_| PayloadError::InvalidJson)?;
        let main = root.main.ok_or(PayloadError::MissingField)?;
        let wind = root.wind.ok_or(PayloadError::MissingField)?;
        let first = root.weather.first().ok_or(PayloadError::MissingField)?;

        Ok(Self {
            temperature: main.temp.ok_or(PayloadError::MissingField)?,
            humidity: main.humidity.ok_or(PayloadError::MissingField)?,
            pressure: main.pressure.ok_or(PayloadError::MissingField)?,
            wind_speed: wind.speed.ok_or(PayloadError::MissingField)?,
            wind_deg: wind.deg.unwrap_or(0.0),
            condition: bounded(first.main.as_deref().ok_or(PayloadError::MissingField)?),
            icon: bounded(first.icon.as_deref().ok_or(PayloadError::MissingField)?),
        })
    }
}
