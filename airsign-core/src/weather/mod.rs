//! Weather data: cache, pressure trend and temperature colors

pub mod cache;
pub mod color;
pub mod history;

pub use cache::{RefreshOutcome, WeatherCache, WeatherSnapshot, WEATHER_URL_BASE};
pub use color::temp_color;
pub use history::{PressureHistory, HISTORY_LEN};
