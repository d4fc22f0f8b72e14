//! Weather readout
//!
//! Temperature, unit and condition text stay on screen; the middle row
//! pages through wind, humidity and pressure. A full page cycle finishes
//! the mode.

use core::fmt::Write;

use airsign_display::{Rgb, Scene};
use heapless::String;
#[allow(unused_imports)]
use micromath::F32Ext;

use super::{Mode, ModeContext, ModeErrorKind, UpdateResult};
use crate::input::Button;
use crate::weather::{temp_color, RefreshOutcome, WeatherCache, WeatherSnapshot};

const SLOT_TEMP: usize = 0;
const SLOT_TEMP_UNIT: usize = 1;
const SLOT_VALUE: usize = 2;
const SLOT_VALUE_UNIT: usize = 3;
const SLOT_GLYPH: usize = 4;
const SLOT_CONDITION: usize = 5;

const UNIT_COLOR: Rgb = Rgb::from_u32(0x202020);
const TEXT_COLOR: Rgb = Rgb::from_u32(0x301040);
const VALUE_COLOR: Rgb = Rgb::from_u32(0x78E078);
const WIND_DIR_COLOR: Rgb = Rgb::from_u32(0xF08070);
const RISING_COLOR: Rgb = Rgb::from_u32(0x40C000);
const FALLING_COLOR: Rgb = Rgb::from_u32(0xC04000);
const STEADY_COLOR: Rgb = Rgb::from_u32(0x444444);

/// Slope magnitude above which the trend counts as rising or falling
const TREND_THRESHOLD: f32 = 0.1;

/// Wind arrows, indexed by direction in 45° steps from north
const WIND_ARROWS: [char; 8] = ['↓', '↙', '←', '↖', '↑', '↗', '→', '↘'];

/// Pages of the middle row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherPage {
    Wind,
    Humidity,
    Pressure,
}

impl WeatherPage {
    const COUNT: u8 = 3;

    fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => WeatherPage::Wind,
            1 => WeatherPage::Humidity,
            _ => WeatherPage::Pressure,
        }
    }
}

/// Weather readout mode
#[derive(Debug, Clone)]
pub struct WeatherDisplay {
    cache: WeatherCache,
    page: u8,
    page_started_ms: u64,
    page_timeout_ms: u64,
    scene: Scene,
}

impl WeatherDisplay {
    pub fn new(cache: WeatherCache, page_timeout_ms: u64) -> Self {
        Self {
            cache,
            page: 0,
            page_started_ms: 0,
            page_timeout_ms,
            scene: Scene::new(),
        }
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    pub fn page(&self) -> WeatherPage {
        WeatherPage::from_index(self.page)
    }

    /// Restart the current page's timer
    pub fn reset_page_timer(&mut self, now_ms: u64) {
        self.page_started_ms = now_ms;
    }

    fn show_snapshot(&mut self, snapshot: &WeatherSnapshot) {
        let reading = &snapshot.reading;
        let mut temp: String<12> = String::new();
        let _ = if reading.temperature.is_sign_negative() {
            write!(temp, "{:.1}", reading.temperature)
        } else {
            write!(temp, " {:.1}", reading.temperature)
        };

        let icon = (!snapshot.icon_path.is_empty()).then_some(snapshot.icon_path.as_str());
        self.scene.set_background(icon);
        self.scene.set_label(SLOT_TEMP, &temp, temp_color(reading.temperature));
        self.scene.set_label(SLOT_TEMP_UNIT, "°C", UNIT_COLOR);
        self.scene.set_label(SLOT_CONDITION, reading.condition.as_str(), TEXT_COLOR);
    }

    fn show_page(&mut self, snapshot: &WeatherSnapshot) {
        let reading = &snapshot.reading;
        let mut value: String<12> = String::new();
        let mut glyph: String<4> = String::new();
        let mut glyph_color = WIND_DIR_COLOR;

        let unit = match self.page() {
            WeatherPage::Wind => {
                let _ = write!(value, "{:3.0} ", reading.wind_speed * 3.6);
                if reading.wind_speed > 0.0 {
                    let index = (reading.wind_deg / 45.0).round() as i32;
                    let _ = glyph.push(WIND_ARROWS[index.rem_euclid(8) as usize]);
                }
                "kph"
            }
            WeatherPage::Humidity => {
                let _ = write!(value, "{:2.0} ", reading.humidity);
                "%rh"
            }
            WeatherPage::Pressure => {
                let _ = write!(value, "{:4.0}", reading.pressure);
                match self.cache.history().slope() {
                    None => {}
                    Some(s) if s > TREND_THRESHOLD => {
                        let _ = glyph.push('↥');
                        glyph_color = RISING_COLOR;
                    }
                    Some(s) if s < -TREND_THRESHOLD => {
                        let _ = glyph.push('↧');
                        glyph_color = FALLING_COLOR;
                    }
                    Some(_) => {
                        let _ = glyph.push('\u{00AD}');
                        glyph_color = STEADY_COLOR;
                    }
                }
                " h\u{33A9}"
            }
        };

        self.scene.set_label(SLOT_VALUE, &value, VALUE_COLOR);
        self.scene.set_label(SLOT_VALUE_UNIT, unit, UNIT_COLOR);
        self.scene.set_label(SLOT_GLYPH, &glyph, glyph_color);
    }
}

impl Mode for WeatherDisplay {
    fn update(&mut self, ctx: &mut ModeContext<'_>) -> UpdateResult {
        let now = ctx.now_ms;
        let outcome = self.cache.refresh(now, &mut *ctx.weather);
        let Some(snapshot) = self.cache.snapshot().cloned() else {
            return UpdateResult::Error(ModeErrorKind::WeatherUnavailable);
        };

        if outcome == RefreshOutcome::Fetched {
            self.page = 0;
            self.page_started_ms = now;
            self.show_snapshot(&snapshot);
        }

        if ctx.buttons.pressed(Button::Dismiss) {
            self.cache.reset_history();
        }

        if now.saturating_sub(self.page_started_ms) > self.page_timeout_ms {
            self.page_started_ms = now;
            self.page = (self.page + 1) % WeatherPage::COUNT;
            if self.page == 0 {
                return UpdateResult::Done;
            }
        }

        self.show_page(&snapshot);
        UpdateResult::Continue
    }

    fn on_activate(&mut self, now_ms: u64) {
        self.reset_page_timer(now_ms);
        self.scene.mark_dirty();
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}
