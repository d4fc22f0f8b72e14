//! Mode names carried on the `mode` topic

/// A mode the sign can be switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeName {
    /// Red on-air indicator
    OnAir,
    /// Amber off-air indicator
    OffAir,
    /// Message board, replayed until another mode is chosen
    Messages,
    /// Weather readout
    Weather,
}

// Wire format values
const MODE_ON_AIR: &str = "OnAir";
const MODE_OFF_AIR: &str = "OffAir";
const MODE_MESSAGES: &str = "Messages";
const MODE_WEATHER: &str = "Weather";

impl ModeName {
    /// Parse a mode from its payload text
    ///
    /// Matching is exact apart from surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            MODE_ON_AIR => Some(ModeName::OnAir),
            MODE_OFF_AIR => Some(ModeName::OffAir),
            MODE_MESSAGES => Some(ModeName::Messages),
            MODE_WEATHER => Some(ModeName::Weather),
            _ => None,
        }
    }

    /// Payload text for this mode
    pub fn as_str(self) -> &'static str {
        match self {
            ModeName::OnAir => MODE_ON_AIR,
            ModeName::OffAir => MODE_OFF_AIR,
            ModeName::Messages => MODE_MESSAGES,
            ModeName::Weather => MODE_WEATHER,
        }
    }

    /// Returns true for the two air indicator submodes
    pub fn is_air(self) -> bool {
        matches!(self, ModeName::OnAir | ModeName::OffAir)
    }
}

impl core::fmt::Display for ModeName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
