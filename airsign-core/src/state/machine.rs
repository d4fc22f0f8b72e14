//! Active mode and succession rules
//!
//! Which mode is on screen is a function of the current mode and an event.

use super::events::Event;
use airsign_protocol::ModeName;

/// The mode currently driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveMode {
    /// On-air / off-air indicator
    AirIndicator,
    /// Weather readout; shown at power-on
    #[default]
    WeatherDisplay,
    /// Queued messages
    MessageBoard,
}

impl ActiveMode {
    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use ActiveMode::*;

        match (self, event) {
            // Commands pre-empt whatever is showing
            (_, Event::Command(ModeName::OnAir | ModeName::OffAir)) => AirIndicator,
            (_, Event::Command(ModeName::Messages)) => MessageBoard,
            (_, Event::Command(ModeName::Weather)) => WeatherDisplay,

            // Pinned board replays
            (MessageBoard, Event::Finished { persist: true, .. }) => MessageBoard,

            // Pending messages take over from any other mode
            (AirIndicator | WeatherDisplay, Event::Finished { queue_nonempty: true, .. }) => {
                MessageBoard
            }

            (_, Event::Finished { .. }) => WeatherDisplay,
        }
    }
}
