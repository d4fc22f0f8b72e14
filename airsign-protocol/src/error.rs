//! Payload decoding errors

/// Why an inbound topic or payload was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Topic does not start with the configured prefix
    #[error("topic is outside the subscribed prefix")]
    ForeignTopic,
    /// Topic suffix is not one the sign handles
    #[error("unknown topic suffix")]
    UnknownTopic,
    /// Mode payload names no known mode
    #[error("unknown mode name")]
    UnknownMode,
    /// Payload bytes are not UTF-8
    #[error("payload is not valid UTF-8")]
    NotUtf8,
    /// Payload is not the expected JSON document
    #[error("payload is not a valid JSON document")]
    InvalidJson,
    /// A required field is absent from the document
    #[error("required field is missing")]
    MissingField,
}
