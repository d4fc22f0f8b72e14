//! Message payloads
//!
//! A message is a JSON object with any of `text`, `picture` and `emoji`:
//!
//! ```json
//! {"text": "back in\n5 min", "emoji": ["☕"]}
//! ```
//!
//! `emoji` may be a plain string or an array of one-character strings;
//! either way it becomes a sequence of code points.

use alloc::string::String as AllocString;
use alloc::vec::Vec as AllocVec;
use heapless::{String, Vec};
use serde::Deserialize;

use crate::error::PayloadError;

/// Maximum bytes of message text
pub const TEXT_LEN: usize = 64;

/// Maximum bytes of a picture path
pub const PICTURE_LEN: usize = 64;

/// Maximum code points in an emoji sequence
pub const EMOJI_LEN: usize = 8;

#[derive(Deserialize)]
#[serde(untagged)]
enum EmojiField {
    Text(AllocString),
    Chars(AllocVec<AllocString>),
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    text: Option<AllocString>,
    #[serde(default)]
    picture: Option<AllocString>,
    #[serde(default)]
    emoji: Option<EmojiField>,
}

/// A decoded message, bounded to fixed capacities
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePayload {
    text: Option<String<TEXT_LEN>>,
    picture: Option<String<PICTURE_LEN>>,
    emoji: Option<Vec<char, EMOJI_LEN>>,
}

/// Copy `src` into a bounded string, cutting on a char boundary
pub(crate) fn bounded<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for ch in src.chars() {
        if out.push(ch).is_err() {
            crate::debug!("truncated field to {} bytes", N);
            break;
        }
    }
    out
}

/// Non-empty picture path that fits `PICTURE_LEN`
///
/// A longer path is dropped rather than cut, so the message falls back to
/// its emoji or text.
fn picture_path(path: &str) -> Option<String<PICTURE_LEN>> {
    if path.is_empty() {
        return None;
    }
    match String::try_from(path) {
        Ok(p) => Some(p),
        Err(_) => {
            crate::warn!("dropping picture path longer than {} bytes", PICTURE_LEN);
            None
        }
    }
}

impl MessagePayload {
    /// Decode a message document
    pub fn from_json(payload: &[u8]) -> Result<Self, PayloadError> {
        let raw: RawMessage =
            serde_json::from_slice(payload).map_err(|_| PayloadError::InvalidJson)?;

        let mut emoji: Vec<char, EMOJI_LEN> = Vec::new();
        let mut push_all = |s: &str| {
            for ch in s.chars() {
                if emoji.push(ch).is_err() {
                    break;
                }
            }
        };
        match &raw.emoji {
            Some(EmojiField::Text(s)) => push_all(s.as_str()),
            Some(EmojiField::Chars(parts)) => parts.iter().for_each(|s| push_all(s.as_str())),
            None => {}
        }

        Ok(Self {
            text: raw.text.as_deref().map(bounded),
            picture: raw.picture.as_deref().and_then(picture_path),
            emoji: (!emoji.is_empty()).then_some(emoji),
        })
    }

    /// A text-only message
    pub fn text_only(text: &str) -> Self {
        Self {
            text: Some(bounded(text)),
            ..Self::default()
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Picture path; never empty
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    /// Emoji code points; never empty
    pub fn emoji(&self) -> Option<&[char]> {
        self.emoji.as_deref()
    }
}
