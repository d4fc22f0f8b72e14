//! airsign command channel
//!
//! The sign subscribes to `<prefix>/#` on a publish/subscribe broker. This
//! crate turns a received `(topic, payload)` pair into a typed [`Command`],
//! and decodes the two JSON documents the sign consumes: message payloads
//! and current-weather readings.
//!
//! # Topics
//!
//! ```text
//! ┌──────────────────┬───────────────────────────────┬──────────────────┐
//! │ TOPIC            │ PAYLOAD                       │ COMMAND          │
//! ├──────────────────┼───────────────────────────────┼──────────────────┤
//! │ <prefix>/mode    │ OnAir | OffAir | Messages |   │ SetMode          │
//! │                  │ Weather                       │                  │
//! │ <prefix>/message │ {"text","picture","emoji"}    │ AppendMessage    │
//! └──────────────────┴───────────────────────────────┴──────────────────┘
//! ```
//!
//! Message payloads stay as raw bytes inside [`Command::AppendMessage`];
//! the message queue decodes them so a malformed document is dropped at
//! the queue boundary.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod message;
pub mod mode;
pub mod topic;
pub mod weather;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub use log::{trace, debug, info, warn, error};
    }
    else if #[cfg(feature = "defmt")] {
        pub use defmt::{trace, debug, info, warn, error};
    }
    else {
        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_imports)]
        pub(crate) use {trace, debug, info, warn, error};
    }
}

pub use error::PayloadError;
pub use message::{MessagePayload, EMOJI_LEN, PICTURE_LEN, TEXT_LEN};
pub use mode::ModeName;
pub use topic::{Command, TopicKind, DEFAULT_PREFIX};
pub use weather::WeatherReading;
