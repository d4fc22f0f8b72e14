//! Display modes
//!
//! Each mode owns a [`Scene`] and updates it once per tick. A mode signals
//! that it has run its course by returning [`UpdateResult::Done`]; the
//! controller then picks the successor.

use airsign_display::Scene;

use crate::input::Buttons;
use crate::traits::{AssetStore, WeatherSource};

pub mod air;
pub mod messages;
pub mod weather;

pub use air::{AirIndicator, AirSubmode};
pub use messages::MessageBoard;
pub use weather::WeatherDisplay;

/// Why a mode could not update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeErrorKind {
    /// No weather reading has been fetched yet
    WeatherUnavailable,
}

/// Result of one mode update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateResult {
    /// Keep this mode active
    Continue,
    /// Mode finished; pick a successor
    Done,
    /// Mode could not update this tick; stay and try again
    Error(ModeErrorKind),
}

/// Per-tick inputs shared by all modes
pub struct ModeContext<'a> {
    pub now_ms: u64,
    pub buttons: Buttons,
    pub weather: &'a mut dyn WeatherSource,
    pub assets: &'a dyn AssetStore,
}

/// A display mode
pub trait Mode {
    /// Advance the mode by one tick
    fn update(&mut self, ctx: &mut ModeContext<'_>) -> UpdateResult;

    /// Called when the controller switches to this mode
    fn on_activate(&mut self, _now_ms: u64) {
        self.scene_mut().mark_dirty();
    }

    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;
}
