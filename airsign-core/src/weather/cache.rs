//! Weather cache
//!
//! Holds the latest reading and decides when to fetch again. A successful
//! fetch replaces the snapshot and extends the pressure history. A failed
//! fetch keeps whatever was there and schedules the next attempt after the
//! retry backoff.

use alloc::string::String as AllocString;
use core::fmt::Write;

use airsign_display::ASSET_PATH_LEN;
use airsign_protocol::WeatherReading;
use heapless::String;

use crate::traits::WeatherSource;
use crate::weather::history::PressureHistory;

/// Current-weather endpoint
pub const WEATHER_URL_BASE: &str = "http://api.openweathermap.org/data/2.5/weather";

/// The latest successful reading
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub reading: WeatherReading,
    pub fetched_at_ms: u64,
    /// Icon bitmap path, `bmps/weather/<icon>.bmp`
    pub icon_path: String<ASSET_PATH_LEN>,
}

/// What a call to [`WeatherCache::refresh`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshOutcome {
    /// Snapshot still within its TTL or backoff; nothing fetched
    Cached,
    /// A new snapshot replaced the old one
    Fetched,
    /// Fetch failed; the previous snapshot is kept
    Stale,
    /// Fetch failed and there is no snapshot at all
    Unavailable,
}

/// Snapshot, pressure history and fetch schedule
#[derive(Debug, Clone)]
pub struct WeatherCache {
    url: AllocString,
    ttl_ms: u64,
    retry_ms: u64,
    snapshot: Option<WeatherSnapshot>,
    history: PressureHistory,
    next_fetch_ms: Option<u64>,
}

impl WeatherCache {
    pub fn new(url: AllocString, ttl_ms: u64, retry_ms: u64) -> Self {
        Self {
            url,
            ttl_ms,
            retry_ms,
            snapshot: None,
            history: PressureHistory::new(),
            next_fetch_ms: None,
        }
    }

    /// Fetch if never fetched, the TTL has run out, or the backoff has passed
    pub fn refresh<W: WeatherSource + ?Sized>(&mut self, now_ms: u64, source: &mut W) -> RefreshOutcome {
        if self.next_fetch_ms.is_some_and(|due| now_ms <= due) {
            return if self.snapshot.is_some() {
                RefreshOutcome::Cached
            } else {
                RefreshOutcome::Unavailable
            };
        }

        match source.fetch(&self.url) {
            Ok(reading) => {
                self.store(reading, now_ms);
                self.next_fetch_ms = Some(now_ms.saturating_add(self.ttl_ms));
                RefreshOutcome::Fetched
            }
            Err(e) => {
                crate::warn!("weather fetch failed: {}", e);
                self.next_fetch_ms = Some(now_ms.saturating_add(self.retry_ms));
                if self.snapshot.is_some() {
                    RefreshOutcome::Stale
                } else {
                    RefreshOutcome::Unavailable
                }
            }
        }
    }

    fn store(&mut self, reading: WeatherReading, now_ms: u64) {
        let mut icon_path = String::new();
        if write!(icon_path, "bmps/weather/{}.bmp", reading.icon.as_str()).is_err() {
            crate::warn!("icon path too long for {}", reading.icon.as_str());
            icon_path.clear();
        }

        self.history.push(reading.pressure);
        crate::info!(
            "weather: {} {}C {}hPa slope {:?}",
            reading.condition.as_str(),
            reading.temperature,
            reading.pressure,
            self.history.slope()
        );

        self.snapshot = Some(WeatherSnapshot {
            reading,
            fetched_at_ms: now_ms,
            icon_path,
        });
    }

    /// Collapse the history to the latest pressure
    pub fn reset_history(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.history.reset_to(snapshot.reading.pressure);
            crate::debug!("pressure history reset");
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn history(&self) -> &PressureHistory {
        &self.history
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::traits::FetchError;

    /// Weather source replaying a script of results
    pub(crate) struct ScriptedSource {
        pub results: alloc::vec::Vec<Result<WeatherReading, FetchError>>,
        pub calls: usize,
    }

    impl ScriptedSource {
        pub fn new(results: alloc::vec::Vec<Result<WeatherReading, FetchError>>) -> Self {
            Self { results, calls: 0 }
        }
    }

    impl WeatherSource for ScriptedSource {
        fn fetch(&mut self, _url: &str) -> Result<WeatherReading, FetchError> {
            self.calls += 1;
            if self.results.is_empty() {
                Err(FetchError::Network)
            } else {
                self.results.remove(0)
            }
        }
    }

    pub(crate) fn reading(temperature: f32, pressure: f32) -> WeatherReading {
        WeatherReading {
            temperature,
            humidity: 55.0,
            pressure,
            wind_speed: 3.0,
            wind_deg: 90.0,
            condition: String::try_from("Clouds").unwrap(),
            icon: String::try_from("04d").unwrap(),
        }
    }

    fn cache() -> WeatherCache {
        WeatherCache::new(AllocString::from("http://example/weather"), 600_000, 30_000)
    }

    #[test]
    fn test_first_refresh_fetches() {
        let mut c = cache();
        let mut src = ScriptedSource::new(alloc::vec![Ok(reading(12.0, 1013.0))]);
        assert_eq!(c.refresh(0, &mut src), RefreshOutcome::Fetched);
        let snap = c.snapshot().unwrap();
        assert_eq!(snap.icon_path.as_str(), "bmps/weather/04d.bmp");
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn test_ttl_respected() {
        let mut c = cache();
        let mut src = ScriptedSource::new(alloc::vec![Ok(reading(12.0, 1013.0)), Ok(reading(13.0, 1014.0))]);
        c.refresh(1_000, &mut src);
        assert_eq!(c.refresh(601_000, &mut src), RefreshOutcome::Cached);
        assert_eq!(src.calls, 1);
        assert_eq!(c.refresh(601_001, &mut src), RefreshOutcome::Fetched);
        assert_eq!(c.history().len(), 2);
        assert!(c.history().slope().unwrap() > 0.0);
    }

    #[test]
    fn test_failure_keeps_snapshot_and_backs_off() {
        let mut c = cache();
        let mut src = ScriptedSource::new(alloc::vec![Ok(reading(12.0, 1013.0))]);
        c.refresh(0, &mut src);
        assert_eq!(c.refresh(600_001, &mut src), RefreshOutcome::Stale);
        assert_eq!(c.snapshot().unwrap().reading.temperature, 12.0);
        assert_eq!(c.history().len(), 1);

        // Next attempt only after the 30 s backoff
        assert_eq!(c.refresh(630_001, &mut src), RefreshOutcome::Cached);
        assert_eq!(src.calls, 2);
        assert_eq!(c.refresh(630_002, &mut src), RefreshOutcome::Stale);
        assert_eq!(src.calls, 3);
    }

    #[test]
    fn test_failure_without_snapshot() {
        let mut c = cache();
        let mut src = ScriptedSource::new(alloc::vec![Err(FetchError::Timeout), Ok(reading(1.0, 990.0))]);
        assert_eq!(c.refresh(0, &mut src), RefreshOutcome::Unavailable);
        assert_eq!(c.refresh(10_000, &mut src), RefreshOutcome::Unavailable);
        assert_eq!(src.calls, 1);
        assert_eq!(c.refresh(30_001, &mut src), RefreshOutcome::Fetched);
    }

    #[test]
    fn test_reset_history() {
        let mut c = cache();
        let mut src = ScriptedSource::new(alloc::vec![Ok(reading(1.0, 990.0)), Ok(reading(1.0, 995.0))]);
        c.refresh(0, &mut src);
        c.refresh(600_001, &mut src);
        assert!(c.history().slope().is_some());
        c.reset_history();
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.history().latest(), Some(995.0));
        assert_eq!(c.history().slope(), None);
    }
}
