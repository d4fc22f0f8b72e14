//! On-air / off-air indicator
//!
//! Wings bitmap with two lines of text whose color pulses on a 4 s cycle.

use airsign_display::{Rgb, Scene};
use airsign_protocol::ModeName;
#[allow(unused_imports)]
use micromath::F32Ext;

use super::{Mode, ModeContext, UpdateResult};
use crate::input::Button;

const SLOT_LINE1: usize = 0;
const SLOT_LINE2: usize = 1;

/// Pulse period in milliseconds
const PULSE_PERIOD_MS: u64 = 4_000;

/// Indicator submodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AirSubmode {
    /// Nothing selected yet
    Off,
    OnAir,
    OffAir,
}

impl AirSubmode {
    fn base_color(self) -> Rgb {
        match self {
            AirSubmode::Off => Rgb::BLACK,
            AirSubmode::OnAir => Rgb::from_u32(0xFF0000),
            AirSubmode::OffAir => Rgb::from_u32(0xDD8000),
        }
    }

    fn background(self) -> Option<&'static str> {
        match self {
            AirSubmode::Off => None,
            AirSubmode::OnAir => Some("bmps/Wings_FF0000.bmp"),
            AirSubmode::OffAir => Some("bmps/Wings_DD8000.bmp"),
        }
    }

    fn lines(self) -> (&'static str, &'static str) {
        match self {
            AirSubmode::Off => ("", ""),
            AirSubmode::OnAir => ("ON", "AIR"),
            AirSubmode::OffAir => ("OFF", "AIR"),
        }
    }
}

/// Pulse intensity at `now_ms`: 0.075 at the cycle edges, 1.0 mid-cycle
pub fn pulse_intensity(now_ms: u64) -> f32 {
    let t = (now_ms % PULSE_PERIOD_MS) as f32 / 1000.0;
    1.0 - 0.925 * (1.0 - t / 2.0).abs()
}

/// Air indicator mode
#[derive(Debug, Clone)]
pub struct AirIndicator {
    submode: AirSubmode,
    scene: Scene,
}

impl Default for AirIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl AirIndicator {
    pub fn new() -> Self {
        Self {
            submode: AirSubmode::Off,
            scene: Scene::new(),
        }
    }

    pub fn submode(&self) -> AirSubmode {
        self.submode
    }

    /// Select the indicator shown
    ///
    /// Only `OnAir` and `OffAir` are accepted. Re-selecting the current
    /// submode leaves the scene untouched.
    pub fn set_submode(&mut self, name: ModeName, now_ms: u64) {
        let submode = match name {
            ModeName::OnAir => AirSubmode::OnAir,
            ModeName::OffAir => AirSubmode::OffAir,
            other => {
                crate::warn!("air indicator: unrecognized submode {:?}", other);
                return;
            }
        };
        if submode == self.submode {
            return;
        }

        self.submode = submode;
        let (line1, line2) = submode.lines();
        self.scene.set_background(submode.background());
        self.scene.set_label(SLOT_LINE1, line1, submode.base_color());
        self.scene.set_label(SLOT_LINE2, line2, submode.base_color());
        self.pulse(now_ms);
        crate::debug!("air indicator now {:?}", submode);
    }

    fn pulse(&mut self, now_ms: u64) {
        let color = self.submode.base_color().scaled(pulse_intensity(now_ms));
        self.scene.set_label_color(SLOT_LINE1, color);
        self.scene.set_label_color(SLOT_LINE2, color);
    }
}

impl Mode for AirIndicator {
    fn update(&mut self, ctx: &mut ModeContext<'_>) -> UpdateResult {
        if ctx.buttons.pressed(Button::Dismiss) {
            return UpdateResult::Done;
        }
        self.pulse(ctx.now_ms);
        UpdateResult::Continue
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}
