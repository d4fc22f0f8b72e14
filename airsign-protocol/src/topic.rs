//! Topic routing
//!
//! Splits `<prefix>/<suffix>` and turns the payload into a [`Command`].

use crate::error::PayloadError;
use crate::mode::ModeName;

/// Topic prefix the sign subscribes under
pub const DEFAULT_PREFIX: &str = "display";

const SUFFIX_MODE: &str = "mode";
const SUFFIX_MESSAGE: &str = "message";

/// Topic suffixes the sign handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicKind {
    Mode,
    Message,
}

impl TopicKind {
    /// Classify `topic` under `prefix`
    pub fn parse(prefix: &str, topic: &str) -> Result<Self, PayloadError> {
        let suffix = topic
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or(PayloadError::ForeignTopic)?;
        match suffix {
            SUFFIX_MODE => Ok(TopicKind::Mode),
            SUFFIX_MESSAGE => Ok(TopicKind::Message),
            _ => Err(PayloadError::UnknownTopic),
        }
    }
}

/// A command received on the command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Switch the active mode
    SetMode(ModeName),
    /// Queue a message; the payload is the undecoded JSON document
    AppendMessage(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Route one received publication
    pub fn parse(prefix: &str, topic: &str, payload: &'a [u8]) -> Result<Self, PayloadError> {
        match TopicKind::parse(prefix, topic)? {
            TopicKind::Mode => {
                let name = core::str::from_utf8(payload).map_err(|_| PayloadError::NotUtf8)?;
                ModeName::parse(name)
                    .map(Command::SetMode)
                    .ok_or(PayloadError::UnknownMode)
            }
            TopicKind::Message => Ok(Command::AppendMessage(payload)),
        }
    }
}
