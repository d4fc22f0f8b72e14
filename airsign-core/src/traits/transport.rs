//! Publish/subscribe transport trait

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Broker sent something the client could not interpret
    #[error("protocol error")]
    Protocol,
    /// No response within the keep-alive or operation deadline
    #[error("operation timed out")]
    Timeout,
    /// Underlying network link is down
    #[error("network link down")]
    LinkDown,
    /// Anything the transport cannot classify
    #[error("unclassified transport failure")]
    Other,
}

/// Trait for the command-channel client
///
/// Implementations are already subscribed to the sign's topic prefix.
/// Taking `&mut self` everywhere lets the fault handler own the handle.
pub trait Transport {
    /// Wait up to `timeout_ms` and hand every received publication to
    /// `on_message` as `(topic, payload)`
    fn poll(
        &mut self,
        timeout_ms: u32,
        on_message: &mut dyn FnMut(&str, &[u8]),
    ) -> Result<(), TransportError>;

    /// Re-establish the broker session and subscriptions
    fn reconnect(&mut self) -> Result<(), TransportError>;

    /// Tear down and bring up the network link itself
    fn reset_link(&mut self) -> Result<(), TransportError>;
}
