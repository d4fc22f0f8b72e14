//! Tiered transport recovery
//!
//! Wraps the per-tick poll. A failed poll is answered with a reconnect
//! (tier 1); if that fails the link is reset and reconnected once (tier 2).
//! A tier-2 failure, or an error the transport cannot classify, is fatal.
//! The status LED is lit for the duration of a recovery and stays lit
//! after a fatal fault.

use airsign_hal::{OutputPin, StatusLed};

use crate::error::FatalError;
use crate::traits::{Transport, TransportError};

/// Recovery escalation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryTier {
    /// Reconnect the broker session
    Reconnect,
    /// Reset the network link, then reconnect
    ResetLink,
}

/// Counters kept across the process lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecoveryStats {
    /// Tier-1 recoveries that succeeded
    pub reconnects: u32,
    /// Tier-2 recoveries that succeeded
    pub link_resets: u32,
}

/// Owner of the transport handle and its retry state
pub struct TransportFaultHandler<T, L> {
    transport: T,
    led: StatusLed<L>,
    stats: RecoveryStats,
    failed: bool,
}

impl<T: Transport, L: OutputPin> TransportFaultHandler<T, L> {
    pub fn new(transport: T, led: StatusLed<L>) -> Self {
        Self {
            transport,
            led,
            stats: RecoveryStats::default(),
            failed: false,
        }
    }

    /// Poll the transport, recovering from any failure
    ///
    /// Received publications are handed to `on_message`. Returns an error
    /// only when recovery is exhausted.
    pub fn poll(
        &mut self,
        timeout_ms: u32,
        on_message: &mut dyn FnMut(&str, &[u8]),
    ) -> Result<(), FatalError> {
        match self.transport.poll(timeout_ms, on_message) {
            Ok(()) => Ok(()),
            Err(e) => self.recover(e),
        }
    }

    fn recover(&mut self, error: TransportError) -> Result<(), FatalError> {
        if error == TransportError::Other {
            return Err(self.fail(error));
        }

        crate::warn!("transport error: {}, reconnecting", error);
        self.led.on();

        let tier = match self.transport.reconnect() {
            Ok(()) => RecoveryTier::Reconnect,
            Err(e) => {
                crate::warn!("reconnect failed: {}, resetting link", e);
                let reset = self
                    .transport
                    .reset_link()
                    .and_then(|()| self.transport.reconnect());
                if let Err(e) = reset {
                    return Err(self.fail(e));
                }
                RecoveryTier::ResetLink
            }
        };

        match tier {
            RecoveryTier::Reconnect => self.stats.reconnects += 1,
            RecoveryTier::ResetLink => self.stats.link_resets += 1,
        }
        self.led.off();
        crate::info!("transport recovered via {:?}", tier);
        Ok(())
    }

    fn fail(&mut self, error: TransportError) -> FatalError {
        crate::error!("transport unrecoverable: {}", error);
        self.led.on();
        self.failed = true;
        FatalError::Transport(error)
    }

    pub fn stats(&self) -> RecoveryStats {
        self.stats
    }

    /// Check if a fatal transport fault has been reported
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn led(&self) -> &StatusLed<L> {
        &self.led
    }

    /// Light the status LED without a recovery in progress
    pub fn light_led(&mut self) {
        self.led.on();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
