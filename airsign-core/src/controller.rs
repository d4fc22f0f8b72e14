//! Mode controller
//!
//! Owns the three modes and the active-mode tag. Commands from the network
//! may pre-empt the active mode at any time; a mode that reports `Done` is
//! replaced according to the succession rules in [`ActiveMode::transition`].

use airsign_display::{DisplayError, RenderSink, Scene};
use airsign_protocol::{Command, ModeName};

use crate::config::SignConfig;
use crate::input::Buttons;
use crate::modes::{AirIndicator, MessageBoard, Mode, ModeContext, UpdateResult, WeatherDisplay};
use crate::state::{ActiveMode, Event};
use crate::traits::{AssetStore, WeatherSource};
use crate::weather::WeatherCache;

const MS_PER_S: u64 = 1_000;

/// Mode controller
pub struct Controller<W, A> {
    active: ActiveMode,
    air: AirIndicator,
    weather: WeatherDisplay,
    board: MessageBoard,
    source: W,
    assets: A,
}

impl<W: WeatherSource, A: AssetStore> Controller<W, A> {
    /// Build all modes from `config`; the weather readout starts active
    pub fn new(config: &SignConfig, source: W, assets: A) -> Self {
        let cache = WeatherCache::new(
            config.weather_url(),
            u64::from(config.weather.ttl_s) * MS_PER_S,
            u64::from(config.weather.retry_s) * MS_PER_S,
        );
        Self {
            active: ActiveMode::default(),
            air: AirIndicator::new(),
            weather: WeatherDisplay::new(cache, u64::from(config.weather.page_timeout_s) * MS_PER_S),
            board: MessageBoard::new(
                u64::from(config.messages.duration_s) * MS_PER_S,
                usize::from(config.messages.column_width),
            ),
            source,
            assets,
        }
    }

    /// Show the initial mode
    pub fn start(&mut self, now_ms: u64) {
        crate::info!("starting in {:?}", self.active);
        self.enter(self.active, now_ms);
    }

    /// Apply one command from the network
    pub fn handle_command(&mut self, command: Command<'_>, now_ms: u64) {
        match command {
            Command::AppendMessage(payload) => {
                self.board.append_json(payload);
            }
            Command::SetMode(name) => self.set_mode(name, now_ms),
        }
    }

    fn set_mode(&mut self, name: ModeName, now_ms: u64) {
        match name {
            ModeName::OnAir | ModeName::OffAir => {
                self.air.set_submode(name, now_ms);
            }
            ModeName::Messages => {
                if !self.board.is_nonempty() {
                    crate::warn!("no messages queued, ignoring {}", name);
                    return;
                }
                self.board.restart();
                self.board.set_persist(true);
            }
            ModeName::Weather => {
                self.board.set_persist(false);
            }
        }
        let next = self.active.transition(Event::Command(name));
        self.enter(next, now_ms);
    }

    /// Update the active mode once and run succession if it finished
    pub fn tick(&mut self, now_ms: u64, buttons: Buttons) -> UpdateResult {
        let result = self.update_active(now_ms, buttons);
        match result {
            UpdateResult::Continue => {}
            UpdateResult::Error(kind) => {
                crate::debug!("{:?} not ready: {:?}", self.active, kind);
            }
            UpdateResult::Done => {
                let event = Event::Finished {
                    queue_nonempty: self.board.is_nonempty(),
                    persist: self.board.persist(),
                };
                let next = self.active.transition(event);
                if next == ActiveMode::MessageBoard && self.active == ActiveMode::MessageBoard {
                    crate::debug!("replaying messages");
                    self.board.restart();
                } else {
                    self.enter(next, now_ms);
                }
            }
        }
        result
    }

    /// Switch to `next`, activate it and give it one immediate update
    fn enter(&mut self, next: ActiveMode, now_ms: u64) {
        if next != self.active {
            crate::info!("mode {:?} -> {:?}", self.active, next);
        }
        self.active = next;
        self.active_mode_mut().on_activate(now_ms);
        let _ = self.update_active(now_ms, Buttons::idle());
    }

    fn update_active(&mut self, now_ms: u64, buttons: Buttons) -> UpdateResult {
        let mode: &mut dyn Mode = match self.active {
            ActiveMode::AirIndicator => &mut self.air,
            ActiveMode::WeatherDisplay => &mut self.weather,
            ActiveMode::MessageBoard => &mut self.board,
        };
        let mut ctx = ModeContext {
            now_ms,
            buttons,
            weather: &mut self.source,
            assets: &self.assets,
        };
        mode.update(&mut ctx)
    }

    fn active_mode_mut(&mut self) -> &mut dyn Mode {
        match self.active {
            ActiveMode::AirIndicator => &mut self.air,
            ActiveMode::WeatherDisplay => &mut self.weather,
            ActiveMode::MessageBoard => &mut self.board,
        }
    }

    /// Scene of the active mode
    pub fn scene(&self) -> &Scene {
        match self.active {
            ActiveMode::AirIndicator => self.air.scene(),
            ActiveMode::WeatherDisplay => self.weather.scene(),
            ActiveMode::MessageBoard => self.board.scene(),
        }
    }

    /// Push the active scene to `sink` if it changed
    ///
    /// Returns whether anything was shown.
    pub fn render<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<bool, DisplayError> {
        if !self.scene().is_dirty() {
            return Ok(false);
        }
        sink.show(self.scene())?;
        self.active_mode_mut().scene_mut().mark_clean();
        Ok(true)
    }

    pub fn active(&self) -> ActiveMode {
        self.active
    }

    pub fn air(&self) -> &AirIndicator {
        &self.air
    }

    pub fn weather(&self) -> &WeatherDisplay {
        &self.weather
    }

    pub fn board(&self) -> &MessageBoard {
        &self.board
    }
}
