//! Events that trigger mode switches

use airsign_protocol::ModeName;

/// Events that can change the active mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A `mode` command arrived
    Command(ModeName),
    /// The active mode returned `Done`
    Finished {
        /// Message queue holds at least one message
        queue_nonempty: bool,
        /// Message board is pinned by an explicit `Messages` command
        persist: bool,
    },
}
