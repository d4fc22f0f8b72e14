//! Faults that stop the master loop

use airsign_display::DisplayError;

use crate::traits::TransportError;

/// Unrecoverable fault; the process should exit and be restarted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    /// Transport could not be recovered by reconnect or link reset
    #[error("transport unrecoverable: {0}")]
    Transport(TransportError),
    /// Render sink rejected a scene
    #[error("render failed: {0}")]
    Display(#[from] DisplayError),
}
